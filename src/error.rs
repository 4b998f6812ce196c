//! Error types for the passport handler
//!
//! Every failure raised while executing a route ends up here and is turned
//! into a 400 response by the dispatcher.

use thiserror::Error;

use crate::store::StoreError;

// == Validation Error Enum ==
/// Rejections of a create-or-update payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `address` absent or empty
    #[error("You need to provide a valid address")]
    MissingAddress,

    /// `score` absent or zero
    #[error("You need to provide a valid score")]
    MissingScore,

    /// `score` outside 0..=1000
    #[error("The score needs to be between 0 and 1000")]
    ScoreOutOfRange,

    /// Update attempted without a transaction ID
    #[error("Updating a passport requires providing the transaction ID of the associated transaction")]
    MissingTransactionId,
}

// == Passport Error Enum ==
/// Unified error type for route execution.
#[derive(Error, Debug)]
pub enum PassportError {
    /// Payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Route key is not one of the four recognized routes
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),

    /// Path-parameterized route invoked without the parameter
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    /// Request body missing or not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// Key-value store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Record disappeared between the update write and the re-read
    #[error("Passport {0} disappeared after update")]
    Vanished(String),

    /// Response body could not be encoded
    #[error("Failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PassportError {
    /// HTTP status code reported for this error.
    ///
    /// All failures collapse to 400, store failures included.
    pub fn status_code(&self) -> u16 {
        400
    }
}

// == Result Type Alias ==
/// Convenience Result type for the passport handler.
pub type Result<T> = std::result::Result<T, PassportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingAddress.to_string(),
            "You need to provide a valid address"
        );
        assert_eq!(
            ValidationError::MissingScore.to_string(),
            "You need to provide a valid score"
        );
        assert_eq!(
            ValidationError::ScoreOutOfRange.to_string(),
            "The score needs to be between 0 and 1000"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err = PassportError::from(ValidationError::MissingTransactionId);
        assert!(err.to_string().starts_with("Updating a passport requires"));
    }

    #[test]
    fn test_unsupported_route_message() {
        let err = PassportError::UnsupportedRoute("POST /passports".to_string());
        assert_eq!(err.to_string(), r#"Unsupported route: "POST /passports""#);
    }

    #[test]
    fn test_every_error_is_bad_request() {
        let errors = vec![
            PassportError::from(ValidationError::MissingScore),
            PassportError::UnsupportedRoute("GET /".to_string()),
            PassportError::Store(StoreError::Backend("throttled".to_string())),
            PassportError::Vanished("addr".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 400);
        }
    }
}
