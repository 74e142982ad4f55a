//! # API Errors
//!
//! The endpoint layer is the only place failures become HTTP statuses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::openapi::ApiSchema;
use crate::service::ServiceError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Use case failure
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body missing, not JSON, or wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id is not an integer
    #[error("Invalid note id: {0}")]
    InvalidId(String),

    /// Query string could not be decoded
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidId(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(err) => match err {
                ServiceError::Validation(_) | ServiceError::InvalidPage { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Storage(StorageError::Constraint(_)) => StatusCode::CONFLICT,
                ServiceError::Storage(StorageError::Timeout(_))
                | ServiceError::Storage(StorageError::Connection(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message exposed to clients. Storage details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Service(ServiceError::Validation(_)) => {
                "Note validation has failed.".to_string()
            }
            ApiError::Service(ServiceError::Storage(StorageError::Constraint(_))) => {
                "Request conflicts with stored data".to_string()
            }
            ApiError::Service(ServiceError::Storage(err)) if err.is_transient() => {
                "Service temporarily unavailable".to_string()
            }
            ApiError::Service(ServiceError::Storage(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ValidationError>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.public_message();
        let violations = match err {
            ApiError::Service(ServiceError::Validation(errors)) => errors.into_violations(),
            _ => Vec::new(),
        };
        Self {
            error,
            code,
            violations,
        }
    }
}

impl ApiSchema for ErrorResponse {
    const NAME: &'static str = "ErrorResponse";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["error", "code"],
            "properties": {
                "error": {"type": "string"},
                "code": {"type": "integer", "format": "int32"},
                "violations": {"type": "array", "items": ValidationError::reference()},
            },
        })
    }
}

impl ApiSchema for ValidationError {
    const NAME: &'static str = "Violation";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["field", "rule", "message"],
            "properties": {
                "field": {"type": "string", "enum": ["title", "body"]},
                "rule": {"type": "string", "enum": ["not_empty", "max_length"]},
                "message": {"type": "string"},
            },
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}
