//! Dialog state for one list workflow.

use crate::entity::EntityId;

/// An open create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession<D> {
    pub draft: D,
    /// Record being edited; `None` when creating.
    pub editing_id: Option<EntityId>,
}

impl<D> EditSession<D> {
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// What the page is doing. At most one dialog is open, and a mutation in
/// flight excludes every other mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<D> {
    Idle,
    Editing(EditSession<D>),
    ConfirmingDelete(EntityId),
    Submitting(EditSession<D>),
    Deleting(EntityId),
}

impl<D> Default for Mode<D> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<D> Mode<D> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing(_) => "editing",
            Self::ConfirmingDelete(_) => "confirming delete",
            Self::Submitting(_) => "submitting",
            Self::Deleting(_) => "deleting",
        }
    }

    #[must_use]
    pub fn is_form_open(&self) -> bool {
        matches!(self, Self::Editing(_) | Self::Submitting(_))
    }

    #[must_use]
    pub fn is_confirm_open(&self) -> bool {
        matches!(self, Self::ConfirmingDelete(_) | Self::Deleting(_))
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        matches!(self, Self::Deleting(_))
    }

    /// Id staged for deletion, while the confirmation is open.
    #[must_use]
    pub fn staged_delete(&self) -> Option<EntityId> {
        match self {
            Self::ConfirmingDelete(id) | Self::Deleting(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession<D>> {
        match self {
            Self::Editing(session) | Self::Submitting(session) => Some(session),
            _ => None,
        }
    }
}
