//! Error handling for ZenFlow
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::registration::RegistrationStatus;

/// Main error type for the ZenFlow application
#[derive(Error, Debug)]
pub enum ZenFlowError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed")]
    Validation { errors: BTreeMap<String, String> },

    #[error("Event not found: {lookup}")]
    EventNotFound { lookup: String },

    #[error("Registration not found: {lookup}")]
    RegistrationNotFound { lookup: String },

    #[error("An event with this title already exists")]
    DuplicateTitle { slug: String },

    #[error("You are already registered for this event")]
    AlreadyRegistered {
        confirmation_code: String,
        status: RegistrationStatus,
    },

    #[error("Event has reached maximum capacity")]
    CapacityExceeded { event_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for ZenFlow operations
pub type Result<T> = std::result::Result<T, ZenFlowError>;

impl ZenFlowError {
    /// Build a validation error for a single field
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message.to_string());
        ZenFlowError::Validation { errors }
    }

    /// Check if the error is recoverable (safe to retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            ZenFlowError::Database(_) => false,
            ZenFlowError::Migration(_) => false,
            ZenFlowError::Redis(_) => true,
            ZenFlowError::Serialization(_) => false,
            ZenFlowError::Io(_) => true,
            ZenFlowError::Config(_) => false,
            ZenFlowError::Validation { .. } => false,
            ZenFlowError::EventNotFound { .. } => false,
            ZenFlowError::RegistrationNotFound { .. } => false,
            ZenFlowError::DuplicateTitle { .. } => false,
            ZenFlowError::AlreadyRegistered { .. } => false,
            ZenFlowError::CapacityExceeded { .. } => false,
            ZenFlowError::InvalidStateTransition { .. } => false,
            ZenFlowError::InvalidInput(_) => false,
            ZenFlowError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ZenFlowError::Database(_) => ErrorSeverity::Critical,
            ZenFlowError::Migration(_) => ErrorSeverity::Critical,
            ZenFlowError::Config(_) => ErrorSeverity::Critical,
            ZenFlowError::Redis(_) => ErrorSeverity::Warning,
            ZenFlowError::Validation { .. } => ErrorSeverity::Info,
            ZenFlowError::InvalidInput(_) => ErrorSeverity::Info,
            ZenFlowError::AlreadyRegistered { .. } => ErrorSeverity::Info,
            ZenFlowError::CapacityExceeded { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_shape() {
        let err = ZenFlowError::field("title", "Event title is required");
        match err {
            ZenFlowError::Validation { errors } => {
                assert_eq!(
                    errors.get("title").map(String::as_str),
                    Some("Event title is required")
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_recoverability() {
        assert!(!ZenFlowError::DuplicateTitle { slug: "x".into() }.is_recoverable());
        assert!(ZenFlowError::ServiceUnavailable("redis".into()).is_recoverable());
    }
}
