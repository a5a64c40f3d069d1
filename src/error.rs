use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("session expired or not signed in: {0}")]
    Unauthorized(String),

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("invalid {kind} '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Coarse classification of a failure, used to pick the user-facing reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// 401/403; the gateway has already cleared the session.
    Auth,
    /// Bad input caught before any request was made.
    Validation,
    /// Connectivity problems and 5xx responses.
    Network,
    NotFound,
    /// Any other 4xx response.
    Client,
    Internal,
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_role(value: String) -> Self {
        ApiError::InvalidValue {
            kind: "role",
            value,
        }
    }

    pub fn invalid_sort_key(value: String) -> Self {
        ApiError::InvalidValue {
            kind: "sort key",
            value,
        }
    }

    pub fn invalid_price_bucket(value: String) -> Self {
        ApiError::InvalidValue {
            kind: "price bucket",
            value,
        }
    }

    pub fn invalid_status_bucket(value: String) -> Self {
        ApiError::InvalidValue {
            kind: "status bucket",
            value,
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ApiError::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => ErrorClass::Auth,
            ApiError::Validation { .. } | ApiError::InvalidValue { .. } => ErrorClass::Validation,
            ApiError::Network(_) => ErrorClass::Network,
            ApiError::Status { status, .. } if status.is_server_error() => ErrorClass::Network,
            ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                ErrorClass::NotFound
            }
            ApiError::Status { .. } => ErrorClass::Client,
            ApiError::Decode(_)
            | ApiError::Storage(_)
            | ApiError::Config(_)
            | ApiError::Io(_)
            | ApiError::Json(_)
            | ApiError::YamlParse(_) => ErrorClass::Internal,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        self.class() == ErrorClass::Auth
    }
}
