//! Errors as seen by a client.

use std::fmt;

use serde::{Deserialize, Serialize};
use tabula_core::Error;

/// A failed request: status code plus a message safe to show the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Serializes as `{"detail": ...}`, the body returned with the status.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "detail": self.detail })
    }
}

/// Maps an error to its status code.
pub fn status_of(err: &Error) -> u16 {
    match err {
        Error::NotFound { .. } => 404,
        Error::InvalidArgument { .. } => 400,
        Error::Unauthenticated => 401,
        Error::Conflict { .. } => 409,
        Error::Internal { .. } => 500,
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let detail = match &err {
            // Internal details stay in the logs.
            Error::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };
        ApiError::new(status_of(&err), detail)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}
