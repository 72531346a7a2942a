//! API types — calls, envelopes, errors, and the backend trait.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entity::EntityId;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status or a non-success envelope.
    /// `status` is the HTTP status when the rejection came from HTTP itself.
    #[error("request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { status: Option<u16>, message: Option<String> },

    /// The response body was not the JSON shape we expected.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Human-readable text supplied by the server, when there was any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_API_TRANSPORT",
            Self::Rejected { .. } => "E_API_REJECTED",
            Self::Decode(_) => "E_API_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Rejected { status: Some(429 | 500..=599), .. })
    }
}

// =============================================================================
// CALLS
// =============================================================================

/// One backend operation. Paths are resolved by the client's route style.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List { resource: &'static str },
    Create { resource: &'static str, body: Value },
    Update { resource: &'static str, id: EntityId, body: Value },
    Delete { resource: &'static str, id: EntityId },
    /// A non-CRUD `POST` to a fixed path relative to the base URL.
    Post { path: String, body: Value },
}

impl ApiCall {
    /// JSON body sent with the call, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Create { body, .. } | Self::Update { body, .. } | Self::Post { body, .. } => Some(body),
            Self::List { .. } | Self::Delete { .. } => None,
        }
    }

    /// Short verb for logs.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Post { .. } => "post",
        }
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// A successful `{ status: 1, data, message }` response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    pub data: Value,
    pub message: Option<String>,
}

impl Envelope {
    #[must_use]
    pub fn new(data: Value, message: Option<String>) -> Self {
        Self { data, message }
    }

    /// Decode the `data` payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `data` does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.data.clone()).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Decode `data` as a list; a missing or null payload is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `data` is present but not a list of `T`.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        if self.data.is_null() {
            return Ok(Vec::new());
        }
        self.decode()
    }
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Backend seam. [`super::ApiClient`] talks HTTP; tests script responses.
#[async_trait::async_trait]
pub trait ResourceApi: Send + Sync {
    /// Execute one call and return the success envelope.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, non-2xx responses,
    /// non-success envelopes and undecodable bodies.
    async fn call(&self, call: ApiCall) -> Result<Envelope, ApiError>;
}

#[async_trait::async_trait]
impl<T: ResourceApi + ?Sized> ResourceApi for &T {
    async fn call(&self, call: ApiCall) -> Result<Envelope, ApiError> {
        (**self).call(call).await
    }
}

#[async_trait::async_trait]
impl<T: ResourceApi + ?Sized> ResourceApi for std::sync::Arc<T> {
    async fn call(&self, call: ApiCall) -> Result<Envelope, ApiError> {
        (**self).call(call).await
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
