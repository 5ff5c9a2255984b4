//! Binary scalar and aggregate handlers

use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use mathgate_core::{AggregateOutcome, BinaryOutcome, RawOperand};

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiQuery, Caller};

/// Query string for the binary scalar operations
#[derive(Debug, Default, Deserialize)]
pub struct CalculateQuery {
    pub operation: Option<String>,
    pub a: Option<String>,
    pub b: Option<String>,
}

/// Add, subtract, multiply or divide two operands
///
/// GET /math/calculate?operation=&a=&b=
pub async fn calculate_binary(
    Caller(caller): Caller,
    ApiQuery(query): ApiQuery<CalculateQuery>,
) -> Result<Json<BinaryOutcome>, ApiError> {
    debug!(user = %caller.username, operation = ?query.operation, "Binary calculation requested");

    let outcome = mathgate_core::calculate_binary(
        query.operation.as_deref(),
        &RawOperand::from(query.a),
        &RawOperand::from(query.b),
    )?;

    Ok(Json(outcome))
}

/// Aggregate an array of numbers
///
/// POST /math/calculate with `{operation, numbers}`
pub async fn calculate_aggregate(
    Caller(caller): Caller,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<AggregateOutcome>, ApiError> {
    let operation = body.get("operation").and_then(Value::as_str);
    let numbers: Option<Vec<RawOperand>> = body
        .get("numbers")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(RawOperand::from).collect());

    debug!(user = %caller.username, operation = ?operation, "Aggregate calculation requested");

    let outcome = mathgate_core::calculate_aggregate(operation, numbers.as_deref())?;

    Ok(Json(outcome))
}
