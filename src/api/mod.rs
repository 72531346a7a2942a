//! API — HTTP client for the inventory backend.
//!
//! DESIGN
//! ======
//! Every endpoint speaks the same `{ status, data, message }` envelope, so the
//! client is a single `call` that resolves a route, sends JSON, and decodes
//! the envelope. Typed list/create/update/delete helpers sit on top of the
//! [`ResourceApi`] trait and work against any implementation.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries. Transport failures, HTTP rejections and envelope
//! rejections all surface as [`ApiError`] for the workflow to report.

pub mod envelope;
pub mod routes;
pub mod types;

#[cfg(test)]
pub mod test_helpers;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::entity::{Entity, EntityId};
pub use routes::RouteStyle;
pub use types::{ApiCall, ApiError, Envelope, ErrorCode, ResourceApi};

// =============================================================================
// CLIENT
// =============================================================================

/// reqwest-backed [`ResourceApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to load.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for a path relative to the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl ResourceApi for ApiClient {
    async fn call(&self, call: ApiCall) -> Result<Envelope, ApiError> {
        let (method, path) = routes::endpoint(&call, self.config.route_style);
        let url = self.url(&path);
        let verb = call.verb();
        debug!(verb, %method, %url, "api: request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = call.body() {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "api: transport failure");
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(verb, %method, %url, status, "api: response");
        envelope::parse_envelope(status, &text)
    }
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Fetch the full collection for `E`.
///
/// # Errors
///
/// Propagates the call's [`ApiError`], or [`ApiError::Decode`] if the
/// payload is not a list of `E`.
pub async fn list<E, A>(api: &A) -> Result<Vec<E>, ApiError>
where
    E: Entity,
    A: ResourceApi + ?Sized,
{
    api.call(ApiCall::List { resource: E::RESOURCE })
        .await?
        .decode_list()
}

/// Create a record for `E` from a serialized payload.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the payload cannot be serialized, or the
/// call's error.
pub async fn create<E, A, P>(api: &A, payload: &P) -> Result<Envelope, ApiError>
where
    E: Entity,
    A: ResourceApi + ?Sized,
    P: Serialize + ?Sized,
{
    let body = to_body(payload)?;
    api.call(ApiCall::Create { resource: E::RESOURCE, body }).await
}

/// Update record `id` of `E`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the payload cannot be serialized, or the
/// call's error.
pub async fn update<E, A, P>(api: &A, id: EntityId, payload: &P) -> Result<Envelope, ApiError>
where
    E: Entity,
    A: ResourceApi + ?Sized,
    P: Serialize + ?Sized,
{
    let body = to_body(payload)?;
    api.call(ApiCall::Update { resource: E::RESOURCE, id, body }).await
}

/// Delete record `id` of `E`.
///
/// # Errors
///
/// Returns the call's error.
pub async fn delete<E, A>(api: &A, id: EntityId) -> Result<Envelope, ApiError>
where
    E: Entity,
    A: ResourceApi + ?Sized,
{
    api.call(ApiCall::Delete { resource: E::RESOURCE, id }).await
}

fn to_body<P: Serialize + ?Sized>(payload: &P) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
