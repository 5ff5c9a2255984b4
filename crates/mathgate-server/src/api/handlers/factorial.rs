use axum::Json;
use serde::Deserialize;

use mathgate_core::FactorialOutcome;

use crate::api::error::ApiError;
use crate::api::extract::{ApiQuery, Caller};

#[derive(Debug, Default, Deserialize)]
pub struct FactorialQuery {
    pub n: Option<String>,
}

/// Compute n!
///
/// GET /math/factorial?n=
pub async fn factorial(
    Caller(_caller): Caller,
    ApiQuery(query): ApiQuery<FactorialQuery>,
) -> Result<Json<FactorialOutcome>, ApiError> {
    Ok(Json(mathgate_core::calculate_factorial(query.n.as_deref())?))
}
