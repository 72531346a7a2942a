//! Workflow — the list manager behind every admin page.
//!
//! DESIGN
//! ======
//! One generic [`ListManager`] per entity replaces six hand-copied pages.
//! It owns the fetched snapshot, the search term, the page number, the sort
//! selection and the dialog [`Mode`]. The visible page is derived on demand
//! and never stored. Mutations never patch `items` locally: a successful
//! create, update or delete is followed by exactly one full refresh.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reported twice: once as a queued [`Notice`] for the
//! user, and once as the returned [`WorkflowError`] for the caller. Flags
//! and modes are restored on every path, so the page stays usable after any
//! failure. Nothing retries.

pub mod mode;
pub mod notice;

use tracing::{info, warn};

use crate::api::{self, ApiError, ErrorCode, ResourceApi};
use crate::entity::sale::LineItems;
use crate::entity::{Draft, Entity, EntityId};
use crate::listing::{self, PageView, SortState};
use crate::lookup::{self, Lookups};
use crate::validation::{FieldError, ValidationErrors};
pub use mode::{EditSession, Mode};
pub use notice::{Notice, NoticeLevel};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("validation failed:\n{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot {operation} while {mode}")]
    InvalidMode { operation: &'static str, mode: &'static str },

    #[error("{noun} {id} not found")]
    NotFound { noun: &'static str, id: EntityId },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl ErrorCode for WorkflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Api(e) => e.error_code(),
            Self::InvalidMode { .. } => "E_INVALID_MODE",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Field(_) => "E_FIELD",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// LIST MANAGER
// =============================================================================

/// Fetch, search, paginate and mutate one entity's collection.
pub struct ListManager<E: Entity, A> {
    api: A,
    items: Vec<E>,
    search: String,
    page: usize,
    page_size: usize,
    sort: Option<SortState<E::SortKey>>,
    loading: bool,
    mode: Mode<E::Draft>,
    lookups: Lookups,
    notices: Vec<Notice>,
}

impl<E: Entity, A: ResourceApi> ListManager<E, A> {
    #[must_use]
    pub fn new(api: A, page_size: usize) -> Self {
        Self {
            api,
            items: Vec::new(),
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            sort: None,
            loading: false,
            mode: Mode::Idle,
            lookups: Lookups::default(),
            notices: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot from the last successful fetch.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_state(&self) -> Option<SortState<E::SortKey>> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> &Mode<E::Draft> {
        &self.mode
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    /// Initial page load: sibling lookups, then the list itself.
    ///
    /// # Errors
    ///
    /// The list error if the list failed, else the first lookup error.
    pub async fn load(&mut self) -> Result<(), WorkflowError> {
        let lookups = self.refresh_lookups().await;
        let list = self.refresh().await.map(|_| ());
        list.and(lookups)
    }

    /// Re-fetch the collection and replace `items` wholesale.
    ///
    /// `loading` is set for the duration of the request. The manager is
    /// borrowed throughout, so the flag is only observable afterwards when
    /// the returned future was dropped mid-request (a hung call abandoned
    /// by a timeout); it then stays set until the next refresh completes.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Api`]; `items` are left untouched.
    pub async fn refresh(&mut self) -> Result<usize, WorkflowError> {
        self.loading = true;
        let result = api::list::<E, A>(&self.api).await;
        self.loading = false;

        match result {
            Ok(items) => {
                info!(resource = E::RESOURCE, count = items.len(), "workflow: list refreshed");
                self.items = items;
                self.page = listing::clamp_page(self.page, self.total_pages());
                Ok(self.items.len())
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, error = %e, code = e.error_code(), "workflow: list failed");
                let message = fallback(&e, || format!("Could not fetch {}.", E::PLURAL));
                self.notices.push(Notice::error(message));
                Err(e.into())
            }
        }
    }

    /// Re-fetch every sibling collection this entity resolves ids against.
    ///
    /// # Errors
    ///
    /// The first failed fetch; later kinds are still attempted.
    pub async fn refresh_lookups(&mut self) -> Result<(), WorkflowError> {
        let mut first_error = None;
        for &kind in E::LOOKUPS {
            match lookup::fetch(&self.api, kind).await {
                Ok(index) => self.lookups.replace(kind, index),
                Err(e) => {
                    warn!(resource = E::RESOURCE, ?kind, error = %e, "workflow: lookup failed");
                    let message = fallback(&e, || format!("Could not fetch {}.", kind.plural()));
                    self.notices.push(Notice::error(message));
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), |e| Err(e.into()))
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Search change; always returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Items matching the search term, in sort order.
    pub fn filtered(&self) -> Vec<&E> {
        let mut view = listing::filter(&self.items, &self.search, |item| item.search_fields(&self.lookups));
        if let Some(state) = self.sort {
            listing::sort(&mut view, state, |a, b, key| a.compare(b, key));
        }
        view
    }

    /// The current page of the filtered view.
    pub fn visible(&self) -> PageView<&E> {
        listing::paginate(&self.filtered(), self.page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        listing::total_pages(self.filtered().len(), self.page_size)
    }

    /// Jump to `page`, clamped into range. Returns the page now shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = listing::clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Header click on a sortable column. Returns to page 1.
    pub fn sort_by(&mut self, key: E::SortKey) -> SortState<E::SortKey> {
        let state = SortState::select(self.sort, key);
        self.sort = Some(state);
        self.page = 1;
        state
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    // -------------------------------------------------------------------------
    // Create / update
    // -------------------------------------------------------------------------

    /// Open an empty create form.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless idle.
    pub fn open_create(&mut self) -> Result<&mut E::Draft, WorkflowError> {
        self.require_idle("open a form")?;
        self.mode = Mode::Editing(EditSession { draft: E::Draft::default(), editing_id: None });
        self.draft_mut()
    }

    /// Open the edit form pre-filled from record `id`.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless idle, [`WorkflowError::NotFound`]
    /// when `id` is not in the current snapshot.
    pub fn open_edit(&mut self, id: EntityId) -> Result<&mut E::Draft, WorkflowError> {
        self.require_idle("open a form")?;
        let draft = self
            .find(id)
            .map(Entity::to_draft)
            .ok_or(WorkflowError::NotFound { noun: E::NOUN, id })?;
        self.mode = Mode::Editing(EditSession { draft, editing_id: Some(id) });
        self.draft_mut()
    }

    /// The open form's draft, also while it is being submitted.
    pub fn draft(&self) -> Option<&E::Draft> {
        self.mode.session().map(|session| &session.draft)
    }

    /// The open form's draft for editing.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless a form is open and not submitting.
    pub fn draft_mut(&mut self) -> Result<&mut E::Draft, WorkflowError> {
        match &mut self.mode {
            Mode::Editing(session) => Ok(&mut session.draft),
            other => Err(WorkflowError::InvalidMode { operation: "edit the draft", mode: other.name() }),
        }
    }

    /// Assign one form field.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] or [`WorkflowError::Field`].
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), WorkflowError> {
        Ok(self.draft_mut()?.set_field(field, value)?)
    }

    /// Line-item editor of the open form, for entities that have one.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`], or [`WorkflowError::Field`] when the
    /// entity has no line items.
    pub fn line_items_mut(&mut self) -> Result<&mut LineItems, WorkflowError> {
        self.draft_mut()?
            .line_items_mut()
            .ok_or_else(|| WorkflowError::Field(FieldError::Unknown("items".into())))
    }

    /// Close the form and discard the draft.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless editing.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        match self.mode {
            Mode::Editing(_) => {
                self.mode = Mode::Idle;
                Ok(())
            }
            ref other => Err(WorkflowError::InvalidMode { operation: "cancel the form", mode: other.name() }),
        }
    }

    /// Validate and send the open form.
    ///
    /// On success the form closes, the draft is dropped and the list is
    /// refreshed once. While the request is in flight the mode is
    /// `Submitting`; an abandoned request leaves it there. On any failure
    /// the form stays open with the draft exactly as it was.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless editing,
    /// [`WorkflowError::Validation`] without sending anything,
    /// [`WorkflowError::Api`] when the backend rejects the request or the
    /// follow-up refresh fails.
    pub async fn submit(&mut self) -> Result<(), WorkflowError> {
        let session = match std::mem::take(&mut self.mode) {
            Mode::Editing(session) => session,
            other => {
                let mode = other.name();
                self.mode = other;
                return Err(WorkflowError::InvalidMode { operation: "submit", mode });
            }
        };

        let payload = match session.draft.payload() {
            Ok(payload) => payload,
            Err(errors) => {
                self.notices.push(Notice::validation(&errors));
                self.mode = Mode::Editing(session);
                return Err(errors.into());
            }
        };

        self.mode = Mode::Submitting(session.clone());
        let (verb, done, result) = match session.editing_id {
            Some(id) => ("update", "updated", api::update::<E, A, _>(&self.api, id, &payload).await),
            None => ("add", "added", api::create::<E, A, _>(&self.api, &payload).await),
        };

        match result {
            Ok(envelope) => {
                info!(resource = E::RESOURCE, id = ?session.editing_id, verb, "workflow: saved");
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("{} {done} successfully.", capitalized(E::NOUN)));
                self.notices.push(Notice::success(message));
                self.mode = Mode::Idle;
                self.refresh().await.map(|_| ())
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id = ?session.editing_id, verb, error = %e, "workflow: save failed");
                let message = fallback(&e, || format!("Could not {verb} {}.", E::NOUN));
                self.notices.push(Notice::error(message));
                self.mode = Mode::Editing(session);
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Stage record `id` and open the confirmation.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless idle, [`WorkflowError::NotFound`]
    /// when `id` is not in the current snapshot.
    pub fn request_delete(&mut self, id: EntityId) -> Result<(), WorkflowError> {
        self.require_idle("delete")?;
        if self.find(id).is_none() {
            return Err(WorkflowError::NotFound { noun: E::NOUN, id });
        }
        self.mode = Mode::ConfirmingDelete(id);
        Ok(())
    }

    /// Close the confirmation and clear the staged id.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless confirming.
    pub fn cancel_delete(&mut self) -> Result<(), WorkflowError> {
        match self.mode {
            Mode::ConfirmingDelete(_) => {
                self.mode = Mode::Idle;
                Ok(())
            }
            ref other => Err(WorkflowError::InvalidMode { operation: "cancel the delete", mode: other.name() }),
        }
    }

    /// Send the staged delete. The confirmation closes and the staged id is
    /// cleared whatever the outcome; a success refreshes the list once.
    /// While the request is in flight the mode is `Deleting`; an abandoned
    /// request leaves it there.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidMode`] unless confirming,
    /// [`WorkflowError::Api`] when the backend refuses or the refresh fails.
    pub async fn confirm_delete(&mut self) -> Result<(), WorkflowError> {
        let id = match self.mode {
            Mode::ConfirmingDelete(id) => id,
            ref other => {
                return Err(WorkflowError::InvalidMode { operation: "confirm the delete", mode: other.name() });
            }
        };

        self.mode = Mode::Deleting(id);
        let result = api::delete::<E, A>(&self.api, id).await;
        self.mode = Mode::Idle;

        match result {
            Ok(envelope) => {
                info!(resource = E::RESOURCE, id, "workflow: deleted");
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("{} deleted successfully.", capitalized(E::NOUN)));
                self.notices.push(Notice::success(message));
                self.refresh().await.map(|_| ())
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id, error = %e, "workflow: delete failed");
                let message = fallback(&e, || format!("Could not delete {}.", E::NOUN));
                self.notices.push(Notice::error(message));
                Err(e.into())
            }
        }
    }

    fn require_idle(&self, operation: &'static str) -> Result<(), WorkflowError> {
        match self.mode {
            Mode::Idle => Ok(()),
            ref other => Err(WorkflowError::InvalidMode { operation, mode: other.name() }),
        }
    }
}

/// Server text when there is any, otherwise the generic message.
fn fallback(error: &ApiError, generic: impl FnOnce() -> String) -> String {
    error.server_message().map_or_else(generic, str::to_string)
}

/// `product category` → `Product category`.
fn capitalized(noun: &str) -> String {
    let mut chars = noun.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
