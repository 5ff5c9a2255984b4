//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use mathgate_auth::AuthError;
use mathgate_core::dispatch::{AGGREGATE_REQUIRED, BINARY_REQUIRED, POWER_REQUIRED};
use mathgate_core::OperationError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request body is not syntactically valid JSON
    #[error("Invalid JSON format in request body")]
    InvalidJson,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Endpoint not found")]
    NotFound,

    /// A handler panicked
    #[error("Something went wrong!")]
    Panic,
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// HTTP status for this error; depends only on the error kind
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Operation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => match err {
                AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::TokenRequired => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::TokenInvalid => StatusCode::FORBIDDEN,
                AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::InvalidJson | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Panic => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, example, details) = match &self {
            ApiError::Operation(err) => (err.code(), err.to_string(), operation_example(err), None),
            ApiError::Auth(err) if err.is_internal() => {
                error!(error = %err, "Authentication fault");
                (err.code(), "Internal server error".to_string(), None, None)
            }
            ApiError::Auth(err) => (err.code(), err.to_string(), None, None),
            ApiError::InvalidJson => (
                "INVALID_JSON",
                self.to_string(),
                None,
                Some(json!("Please check your JSON syntax")),
            ),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone(), None, None),
            ApiError::PayloadTooLarge => ("PAYLOAD_TOO_LARGE", self.to_string(), None, None),
            ApiError::NotFound => ("NOT_FOUND", self.to_string(), None, None),
            ApiError::Panic => ("INTERNAL_ERROR", self.to_string(), None, None),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            example,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Usage hint attached to errors a caller can fix by reshaping the request
fn operation_example(err: &OperationError) -> Option<Value> {
    match err {
        OperationError::MissingParameters { required } => match *required {
            BINARY_REQUIRED => Some(json!("/math/calculate?operation=add&a=5&b=3")),
            AGGREGATE_REQUIRED => Some(json!({ "operation": "sum", "numbers": [1, 2, 3, 4] })),
            POWER_REQUIRED => Some(json!({ "base": 2, "exponent": 3 })),
            _ => None,
        },
        OperationError::InvalidRange { .. } => Some(json!("/math/factorial?n=5")),
        _ => None,
    }
}
