//! Error types for Tabula.

use alloc::string::String;
use core::fmt;

/// Result type alias for Tabula operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Tabula operations.
///
/// `NotFound` covers both "does not exist" and "owned by someone else"; the
/// two are deliberately indistinguishable to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Dataset or user absent, or not owned by the caller.
    NotFound {
        entity: String,
        key: String,
    },
    /// A request parameter is missing, out of range or not a known value.
    InvalidArgument {
        message: String,
    },
    /// Missing or invalid credential.
    Unauthenticated,
    /// Duplicate user or email.
    Conflict {
        message: String,
    },
    /// Store unavailable or an unexpected failure.
    Internal {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { entity, .. } => {
                write!(f, "{} not found", entity)
            }
            Error::InvalidArgument { message } => write!(f, "{}", message),
            Error::Unauthenticated => write!(f, "Could not validate credentials"),
            Error::Conflict { message } => write!(f, "{}", message),
            Error::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a not found error.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Error::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Error::Conflict {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("Dataset", "abc");
        assert_eq!(err.to_string(), "Dataset not found");

        let err = Error::invalid_argument("aggregate_column required for sum");
        assert_eq!(err.to_string(), "aggregate_column required for sum");

        assert_eq!(
            Error::Unauthenticated.to_string(),
            "Could not validate credentials"
        );
    }

    #[test]
    fn test_not_found_hides_key() {
        // The key is kept for logs but never rendered to the caller.
        let err = Error::not_found("Dataset", "0000000000000000000000ff");
        assert!(!err.to_string().contains("ff"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_constructors() {
        match Error::conflict("Email already registered") {
            Error::Conflict { message } => assert_eq!(message, "Email already registered"),
            _ => panic!("Wrong error type"),
        }
        match Error::internal("store offline") {
            Error::Internal { message } => assert_eq!(message, "store offline"),
            _ => panic!("Wrong error type"),
        }
    }
}
