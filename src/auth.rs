//! Password reset requests for admin accounts.

use serde_json::json;
use tracing::info;

use crate::api::{ApiCall, ResourceApi};
use crate::validation::{self, ValidationErrors};
use crate::workflow::{Notice, WorkflowError};

pub const PASSWORD_RESET_PATH: &str = "auth/password-reset";

/// Ask the backend to email a reset link to `email`.
///
/// Returns the notice to show on success.
///
/// # Errors
///
/// [`WorkflowError::Validation`] before sending when the address is blank or
/// malformed, [`WorkflowError::Api`] when the backend refuses.
pub async fn request_password_reset<A: ResourceApi + ?Sized>(api: &A, email: &str) -> Result<Notice, WorkflowError> {
    let email = email.trim();
    let mut errors = ValidationErrors::new();
    errors.require(email, "Email is required");
    if !validation::is_blank(email) && !validation::looks_like_email(email) {
        errors.push("Email must be a valid address");
    }
    errors.into_result()?;

    let envelope = api
        .call(ApiCall::Post { path: PASSWORD_RESET_PATH.to_string(), body: json!({ "email": email }) })
        .await?;
    info!("auth: password reset requested");
    Ok(Notice::success(
        envelope
            .message
            .unwrap_or_else(|| format!("Password reset link sent to {email}.")),
    ))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
