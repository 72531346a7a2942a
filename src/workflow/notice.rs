//! User-facing notifications queued by workflows.

use std::fmt;

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Validation,
}

/// One transient notification, e.g. a toast or an alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, title: "Success".into(), message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: "Error".into(), message: message.into() }
    }

    /// Every validation problem, one per line.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            level: NoticeLevel::Validation,
            title: "Validation Error".into(),
            message: errors.to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
