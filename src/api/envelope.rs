//! Envelope decoding.
//!
//! Pure function over `(http status, body text)` so every success/failure
//! combination is testable without a server.

use serde_json::Value;

use super::types::{ApiError, Envelope};

/// Decode a raw HTTP response into a success envelope.
///
/// Success requires a 2xx status and a `status` field of `1` or `true`.
/// A body without a `status` field is accepted as success when the HTTP
/// status is 2xx; a bare JSON array is treated as the `data` payload.
///
/// # Errors
///
/// - [`ApiError::Rejected`] for non-2xx responses or non-success envelopes,
///   carrying the server's `message`/`error` text when present.
/// - [`ApiError::Decode`] for a 2xx response whose body is not JSON.
pub fn parse_envelope(http_status: u16, body: &str) -> Result<Envelope, ApiError> {
    let http_ok = (200..300).contains(&http_status);

    if body.trim().is_empty() {
        if http_ok {
            return Ok(Envelope::default());
        }
        return Err(ApiError::Rejected { status: Some(http_status), message: None });
    }

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(e) if http_ok => return Err(ApiError::Decode(e.to_string())),
        Err(_) => return Err(ApiError::Rejected { status: Some(http_status), message: None }),
    };

    let message = extract_message(&value);

    if !http_ok {
        return Err(ApiError::Rejected { status: Some(http_status), message });
    }

    let Value::Object(mut map) = value else {
        return Ok(Envelope::new(value, None));
    };

    if !status_is_success(map.get("status")) {
        return Err(ApiError::Rejected { status: None, message });
    }

    let data = map.remove("data").unwrap_or(Value::Null);
    Ok(Envelope::new(data, message))
}

fn status_is_success(status: Option<&Value>) -> bool {
    match status {
        None => true,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::Bool(b)) => *b,
        Some(_) => false,
    }
}

/// Pull the human-readable text out of an error or success body.
///
/// `message` may be a string or an array of strings (validation errors from
/// the backend); arrays are joined with newlines. Falls back to `error`.
#[must_use]
pub fn extract_message(value: &Value) -> Option<String> {
    let from = |key: &str| -> Option<String> {
        match value.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(parts) if !parts.is_empty() => Some(
                parts
                    .iter()
                    .map(|p| match p {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    };
    from("message").or_else(|| from("error"))
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
