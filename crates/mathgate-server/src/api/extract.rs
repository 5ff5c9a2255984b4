//! Request extractors with mathgate error bodies

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::{request::Parts, StatusCode},
};
use tracing::debug;

use mathgate_auth::{AuthError, CallerIdentity};

use crate::api::error::ApiError;

/// JSON body extractor whose rejections use [`ApiError`]
///
/// Malformed JSON becomes [`ApiError::InvalidJson`]; well-formed JSON of the
/// wrong shape keeps the deserializer's message.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                debug!(rejection = %rejection.body_text(), "Rejected request body");
                Err(rejection.into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) => ApiError::InvalidJson,
            JsonRejection::JsonDataError(err) => ApiError::BadRequest(err.body_text()),
            JsonRejection::MissingJsonContentType(err) => ApiError::BadRequest(err.body_text()),
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Query string extractor whose rejections use [`ApiError`]
///
/// A query that cannot be deserialized, such as a repeated scalar
/// parameter, is a 400 with the deserializer's message.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    axum::extract::Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => {
                debug!(rejection = %rejection.body_text(), "Rejected query string");
                Err(rejection.into())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// The authenticated caller, placed in request extensions by the guard
/// middleware
#[derive(Debug, Clone)]
pub struct Caller(pub CallerIdentity);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .map(Caller)
            .ok_or(ApiError::Auth(AuthError::TokenRequired))
    }
}
