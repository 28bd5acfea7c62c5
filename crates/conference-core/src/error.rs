//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid conference definition: {0}")]
    InvalidConference(String),

    #[error("Malformed email address: {0}")]
    MalformedEmail(String),

    #[error("Invalid payload for {config_type}:{key}: {reason}")]
    InvalidPayload {
        config_type: String,
        key: String,
        reason: String,
    },

    #[error("Configuration store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn invalid_payload(config_type: &str, key: &str, reason: impl ToString) -> Self {
        DomainError::InvalidPayload {
            config_type: config_type.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Errors that mean "no dynamic override right now" rather than bad data.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable(_) | DomainError::DatabaseError(_))
    }
}
