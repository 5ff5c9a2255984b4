//! Operation names and the pure arithmetic behind them
//!
//! Operations are grouped into families. Each family parses its operation
//! names case-insensitively and rejects anything else with
//! [`OperationError::UnsupportedOperation`].

use std::str::FromStr;

use crate::error::{OperationError, Result};

/// Operation families that validate numeric operands
///
/// Factorial input is range-checked as a whole and has no family here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// Two scalar operands: add, subtract, multiply, divide
    Binary,
    /// A sequence of operands: sum, product, average, max, min
    Aggregate,
    /// base^exponent
    Power,
}

impl OperationFamily {
    /// Comma-separated list of the operation names in this family
    pub fn supported_operations(&self) -> &'static str {
        match self {
            OperationFamily::Binary => "add, subtract, multiply, divide",
            OperationFamily::Aggregate => "sum, product, average, max, min",
            OperationFamily::Power => "power",
        }
    }

    pub(crate) fn invalid_numeric_message(&self) -> &'static str {
        match self {
            OperationFamily::Binary => "Parameters a and b must be valid numbers",
            OperationFamily::Aggregate => "All elements in numbers array must be valid numbers",
            OperationFamily::Power => "Base and exponent must be valid numbers",
        }
    }
}

impl std::fmt::Display for OperationFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationFamily::Binary => write!(f, "binary"),
            OperationFamily::Aggregate => write!(f, "aggregate"),
            OperationFamily::Power => write!(f, "power"),
        }
    }
}

/// Scalar operation over two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FromStr for BinaryOp {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "add" => Ok(BinaryOp::Add),
            "subtract" => Ok(BinaryOp::Subtract),
            "multiply" => Ok(BinaryOp::Multiply),
            "divide" => Ok(BinaryOp::Divide),
            _ => Err(OperationError::UnsupportedOperation {
                family: OperationFamily::Binary,
                name: s.to_string(),
            }),
        }
    }
}

impl BinaryOp {
    /// Apply the operation.
    ///
    /// A zero divisor is rejected before dividing, and an overflowing result
    /// is rejected rather than returned as infinity.
    pub fn apply(self, a: f64, b: f64) -> Result<f64> {
        let result = match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => {
                if b == 0.0 {
                    return Err(OperationError::DivisionByZero);
                }
                a / b
            }
        };

        ensure_finite(result)
    }
}

/// Aggregate operation over a non-empty sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Sum,
    Product,
    Average,
    Max,
    Min,
}

impl FromStr for AggregateOp {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(AggregateOp::Sum),
            "product" => Ok(AggregateOp::Product),
            "average" => Ok(AggregateOp::Average),
            "max" => Ok(AggregateOp::Max),
            "min" => Ok(AggregateOp::Min),
            _ => Err(OperationError::UnsupportedOperation {
                family: OperationFamily::Aggregate,
                name: s.to_string(),
            }),
        }
    }
}

impl AggregateOp {
    /// Apply the aggregate to the full sequence
    pub fn apply(self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            return Err(OperationError::EmptySequence);
        }

        let result = match self {
            AggregateOp::Sum => values.iter().fold(0.0, |acc, n| acc + n),
            AggregateOp::Product => values.iter().fold(1.0, |acc, n| acc * n),
            AggregateOp::Average => {
                values.iter().fold(0.0, |acc, n| acc + n) / values.len() as f64
            }
            AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        };

        ensure_finite(result)
    }
}

/// Largest n whose factorial is representable as a finite f64
pub const MAX_FACTORIAL_INPUT: u32 = 170;

/// base^exponent, rejecting overflow and undefined results such as `0^-1`
pub fn power(base: f64, exponent: f64) -> Result<f64> {
    ensure_finite(base.powf(exponent))
}

/// n! by iterative accumulation
pub fn factorial(n: u32) -> Result<f64> {
    if n > MAX_FACTORIAL_INPUT {
        return Err(OperationError::InvalidRange {
            max: MAX_FACTORIAL_INPUT,
        });
    }

    let mut result = 1.0_f64;
    for i in 2..=n {
        result *= f64::from(i);
    }

    Ok(result)
}

fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OperationError::NonFiniteResult)
    }
}
