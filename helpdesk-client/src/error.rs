//! Client error types

use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server rejected the credentials or token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other API error response
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
        details: Option<Value>,
    },

    /// Operation requires a logged-in session
    #[error("Not logged in")]
    NotAuthenticated,

    /// Password and confirmation differ
    #[error("Password confirmation does not match")]
    PasswordMismatch,

    /// Component used out of order (e.g. submit before load)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Session file I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What a caller can do about a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Transient; the same request may succeed later
    Retry,
    /// Retrying without changing the input will fail again
    Terminal,
}

impl ClientError {
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Http(e) if e.is_decode() || e.is_builder() => Recovery::Terminal,
            Self::Http(_) | Self::Timeout(_) => Recovery::Retry,
            Self::Api { status, .. } if *status >= 500 || *status == 429 => Recovery::Retry,
            _ => Recovery::Terminal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.recovery() == Recovery::Retry
    }

    /// Build an error from a non-success response.
    ///
    /// JSON bodies of the form `{code?, message, details?, errors?}` are
    /// decoded; anything else keeps the raw text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let (code, message, details) = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(err) => (err.code, err.message, err.details.or(err.errors)),
            Err(_) if body.trim().is_empty() => (
                None,
                status.canonical_reason().unwrap_or("Request failed").to_string(),
                None,
            ),
            Err(_) => (None, body.to_string(), None),
        };

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            _ => Self::Api {
                status: status.as_u16(),
                code,
                message,
                details,
            },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Http(e)
        }
    }
}

/// 服务端返回的错误响应格式
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
    /// Field errors as sent by form-validation backends
    #[serde(default)]
    pub errors: Option<Value>,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
