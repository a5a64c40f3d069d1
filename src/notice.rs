//! User-facing notices built from errors and command outcomes.
//!
//! Building a notice never has side effects: an auth notice only says the
//! session ended, the gateway has already handled the redirect.

use std::fmt;

use owo_colors::OwoColorize;

use crate::error::{ApiError, ErrorClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Classify `err` and phrase it for the user.
    pub fn from_error(err: &ApiError) -> Self {
        match err.class() {
            ErrorClass::Auth => Notice::warning("Your session has expired. Please sign in again."),
            ErrorClass::Validation => Notice::warning(err.to_string()),
            ErrorClass::Network => match err {
                ApiError::Status { status, .. } => Notice::error(format!(
                    "The server is having trouble ({status}). Please try again later."
                )),
                _ => Notice::error(format!("Could not reach the server: {err}")),
            },
            ErrorClass::NotFound => Notice::info("Nothing was found."),
            ErrorClass::Client => match err {
                ApiError::Status { body, .. } if !body.trim().is_empty() => {
                    Notice::error(body.trim().to_string())
                }
                _ => Notice::error(err.to_string()),
            },
            ErrorClass::Internal => Notice::error(err.to_string()),
        }
    }

    pub fn render(&self) -> String {
        match self.level {
            NoticeLevel::Info => self.message.cyan().to_string(),
            NoticeLevel::Success => self.message.green().to_string(),
            NoticeLevel::Warning => self.message.yellow().to_string(),
            NoticeLevel::Error => self.message.red().to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Notice::from_error(err)
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[test]
    fn test_auth_failure_is_expiry_warning() {
        let notice = Notice::from_error(&ApiError::Forbidden("nope".to_string()));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("expired"));
    }

    #[test]
    fn test_server_error_is_network_error() {
        let notice = Notice::from_error(&ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        });
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("503"));
    }

    #[test]
    fn test_client_error_uses_body() {
        let notice = Notice::from_error(&ApiError::Status {
            status: StatusCode::CONFLICT,
            body: "Voucher already redeemed".to_string(),
        });
        assert_eq!(notice.message, "Voucher already redeemed");
    }

    #[test]
    fn test_not_found_is_informational() {
        let notice = Notice::from_error(&ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        });
        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[test]
    fn test_validation_is_warning() {
        let notice = Notice::from_error(&ApiError::validation("rating", "out of range"));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.to_string(), "invalid rating: out of range");
    }
}
