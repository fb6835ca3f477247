//! WebServer-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shared::{Collection, SharedError, component_error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("{} not found", .collection.singular())]
    NotFound { collection: Collection, id: String },

    #[error("{details}")]
    InvalidRequest { details: String },

    #[error("{0}")]
    Validation(#[from] SharedError),

    #[error("Referenced {} {id} does not exist ({field})", .collection.singular())]
    DanglingReference {
        field: String,
        collection: Collection,
        id: String,
    },

    #[error("{} with {fields} {value} already exists", .collection.singular())]
    Duplicate {
        collection: Collection,
        fields: String,
        value: String,
    },

    #[error("Store operation failed: {message}")]
    Store { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),
}

impl WebServerError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        WebServerError::NotFound {
            collection,
            id: id.into(),
        }
    }

    pub fn invalid(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest { details: details.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        WebServerError::Store { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebServerError::InvalidRequest { .. }
            | WebServerError::Validation(_)
            | WebServerError::DanglingReference { .. }
            | WebServerError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            WebServerError::Store { .. }
            | WebServerError::Config(_)
            | WebServerError::ServerStartup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            component_error!(shared::Component::Server, error = %self, "Request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebServerError::not_found(Collection::Teams, "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(WebServerError::invalid("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            WebServerError::from(SharedError::MissingField { field: "teamName".into() }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WebServerError::store("down").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            WebServerError::Config("bad port".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(
            WebServerError::not_found(Collection::Companies, "c1").to_string(),
            "Company not found"
        );
        let duplicate = WebServerError::Duplicate {
            collection: Collection::Companies,
            fields: "companyName".to_string(),
            value: "\"Acme\"".to_string(),
        };
        assert_eq!(duplicate.to_string(), "Company with companyName \"Acme\" already exists");
    }
}
