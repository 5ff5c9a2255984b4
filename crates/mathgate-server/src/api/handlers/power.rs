use axum::Json;
use serde_json::Value;

use mathgate_core::{PowerOutcome, RawOperand};

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, Caller};

/// Raise base to exponent
///
/// PUT /math/power with `{base, exponent}`
pub async fn power(
    Caller(_caller): Caller,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<PowerOutcome>, ApiError> {
    let outcome = mathgate_core::calculate_power(
        &RawOperand::from(body.get("base")),
        &RawOperand::from(body.get("exponent")),
    )?;

    Ok(Json(outcome))
}
