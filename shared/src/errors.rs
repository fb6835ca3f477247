//! Shared error types for the hackathon hub

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Malformed {collection} payload: {message}")]
    DeserializationError { collection: String, message: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },
}

impl SharedError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SharedError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
