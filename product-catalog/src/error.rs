//! Error types and HTTP response conversion
//!
//! Every failure the service can produce is a variant of [`Error`]. The status
//! code for each variant comes from one exhaustive match in
//! [`Error::status_code`], and `impl IntoResponse for Error` is the only place
//! that writes an error response. The body is always the uniform envelope:
//!
//! ```json
//! { "success": false, "error": "Product not found" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::FieldError;

/// Fallback message for failures that carry no usable message of their own
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Service error type
#[derive(Debug, Error)]
pub enum Error {
    /// The client sent structurally invalid data
    #[error("{message}")]
    Validation {
        /// Message returned to the client
        message: String,
        /// Per-field details; logged, never serialized
        fields: Vec<FieldError>,
    },

    /// The referenced resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The path exists but does not accept the request method
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Anything else that reaches the boundary
    #[error("{0}")]
    Internal(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Listener or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Validation failure without field details
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Validation failure carrying the fields that failed
    pub fn invalid_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Error::Validation {
            message: message.into(),
            fields,
        }
    }

    /// HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::Internal(_) | Error::Config(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client
    ///
    /// Startup failures never leak their details over the wire.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation { message, .. } => message.clone(),
            Error::NotFound(message) | Error::MethodNotAllowed(message) => message.clone(),
            Error::Internal(message) if !message.trim().is_empty() => message.clone(),
            Error::Internal(_) | Error::Config(_) | Error::Io(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Field-level details of a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

/// Uniform error envelope written for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,

    /// Human-readable error message
    #[schema(example = "Invalid product data")]
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error envelope
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Error::Validation { message, fields } => {
                tracing::warn!(
                    status = status.as_u16(),
                    fields = ?fields,
                    "Validation error: {}", message
                );
            }
            Error::NotFound(message) => {
                tracing::info!(status = status.as_u16(), "Not found: {}", message);
            }
            Error::MethodNotAllowed(message) => {
                tracing::info!(status = status.as_u16(), "Method not allowed: {}", message);
            }
            Error::Internal(message) => {
                tracing::error!(status = status.as_u16(), "Internal error: {}", message);
            }
            Error::Config(e) => {
                tracing::error!(status = status.as_u16(), "Configuration error: {}", e);
            }
            Error::Io(e) => {
                tracing::error!(status = status.as_u16(), "I/O error: {}", e);
            }
        }

        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Render a caught handler panic through the same boundary mapper
///
/// Used as the `CatchPanicLayer` response builder. The panic payload is logged
/// but never sent to the client.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    Error::Internal(INTERNAL_ERROR_MESSAGE.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(
            Error::validation("Invalid product data").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::NotFound("Product not found".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::MethodNotAllowed("Method not allowed".to_string()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            Error::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        assert_eq!(Error::from(io).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_public_message() {
        assert_eq!(
            Error::NotFound("Product not found".to_string()).public_message(),
            "Product not found"
        );
        assert_eq!(Error::Internal("store unavailable".to_string()).public_message(), "store unavailable");
        assert_eq!(Error::Internal("  ".to_string()).public_message(), INTERNAL_ERROR_MESSAGE);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "secret socket detail");
        assert_eq!(Error::from(io).public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_field_errors_only_on_validation() {
        let err = Error::invalid_fields(
            "Invalid product data",
            vec![FieldError::new("name", "TOO_SHORT", "Name must be at least 3 characters")],
        );
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "name");
        assert!(Error::NotFound("x".to_string()).field_errors().is_empty());
    }

    #[test]
    fn test_error_response_serialization() {
        let body = serde_json::to_value(ErrorResponse::new("Product not found")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "Product not found" })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = Error::NotFound("Product not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Error::validation("Invalid product data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_panic_response_is_internal() {
        let response = panic_response(Box::new("handler exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
