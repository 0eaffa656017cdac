//! Client error types

use http::StatusCode;
use thiserror::Error;

use crate::session::Action;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport unreachable or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the service
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403 from the service
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Input rejected locally, or a 400 from the service
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Body did not decode into the expected type
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No authenticated session
    #[error("Authentication required")]
    NotAuthenticated,

    /// Session role does not allow the action
    #[error("Permission denied: {0}")]
    PermissionDenied(Action),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Token file could not be written or removed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// 401 or 403 from the service
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }

    /// Map a non-success status and its body to an error.
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = error_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::BAD_REQUEST => Self::Validation(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// `message` or `error` field of a JSON body, else the raw text, else the
/// status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key)
                && !msg.is_empty()
            {
                return msg.clone();
            }
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<crate::session::StorageError> for ClientError {
    fn from(err: crate::session::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
