//! Error types for the Quill base library.
//!
//! Two kinds of failure exist side by side: [`BaseError`] for operations
//! that can genuinely fail (registry I/O, serialization), and
//! [`ConstraintError`] for field-level constraint violations carrying a
//! user-facing message. Coercion helpers in [`crate::utils`] never fail,
//! and id checks report problems as plain strings instead of errors.

use thiserror::Error;

/// Common error type for base library operations
#[derive(Error, Debug)]
pub enum BaseError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Registry error: {record} - {message}")]
    Registry { record: String, message: String },

    #[error("Unknown content type: {type_name}")]
    UnknownType { type_name: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for BaseError {
    fn from(error: anyhow::Error) -> Self {
        BaseError::Internal {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for BaseError {
    fn from(error: serde_json::Error) -> Self {
        BaseError::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BaseError {
    fn from(error: serde_yaml::Error) -> Self {
        BaseError::Serialization {
            message: error.to_string(),
        }
    }
}

/// Result type alias for base library operations
pub type BaseResult<T> = Result<T, BaseError>;

/// A field constraint violation with a message fit for display in a
/// settings form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Must be empty or a valid JSON-formatted configuration - {message}.")]
    InvalidJson { message: String },

    #[error("Username should not include the \"{prefix}\" prefix character.")]
    DisallowedPrefix { prefix: char },

    #[error("The expression \"{expression}\" is invalid")]
    InvalidExpression { expression: String },

    #[error("An action with the id \"{action_id}\" already exists")]
    DuplicateActionId { action_id: String },

    #[error("The id \"{action_id}\" is invalid")]
    InvalidActionId { action_id: String },

    #[error("{field}: {message}")]
    Field { field: String, message: String },
}
