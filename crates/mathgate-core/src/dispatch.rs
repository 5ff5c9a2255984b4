//! Operation dispatch
//!
//! One entry point per operation family. Each validates its raw input,
//! routes to the pure arithmetic in [`crate::operation`], and stamps the
//! result. Validation failures short-circuit: no partial result is ever
//! produced for a rejected request.

use chrono::Utc;
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::operation::{self, AggregateOp, BinaryOp, OperationFamily, MAX_FACTORIAL_INPUT};
use crate::types::{
    AggregateOutcome, BinaryOutcome, FactorialOutcome, Operands, PowerOutcome, RawOperand,
};

/// Inputs required by the binary scalar family
pub const BINARY_REQUIRED: &str = "operation, a, b";

/// Inputs required by the aggregate family
pub const AGGREGATE_REQUIRED: &str = "operation (string), numbers (array)";

/// Inputs required by the power family
pub const POWER_REQUIRED: &str = "base, exponent";

/// Apply add, subtract, multiply or divide to two operands
///
/// Checks run in order: operation present, both operands numeric, operation
/// name known, then the computation itself.
pub fn calculate_binary(
    operation: Option<&str>,
    a: &RawOperand,
    b: &RawOperand,
) -> Result<BinaryOutcome> {
    let operation = require_operation(operation, BINARY_REQUIRED)?;

    let (a, b) = match (a.to_finite(), b.to_finite()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(OperationError::InvalidNumeric {
                family: OperationFamily::Binary,
            })
        }
    };

    let op: BinaryOp = operation.parse()?;
    let result = op.apply(a, b)?;

    debug!(operation = ?op, a, b, result, "Binary operation computed");

    Ok(BinaryOutcome {
        operation: operation.to_string(),
        operands: Operands { a, b },
        result,
        timestamp: Utc::now(),
    })
}

/// Aggregate a sequence with sum, product, average, max or min
///
/// `numbers` is `None` when the request did not carry an array. Elements
/// must be JSON numbers; numeric strings are not coerced here. A single
/// non-numeric element rejects the whole request.
pub fn calculate_aggregate(
    operation: Option<&str>,
    numbers: Option<&[RawOperand]>,
) -> Result<AggregateOutcome> {
    let (operation, numbers) = match (operation.filter(|op| !op.is_empty()), numbers) {
        (Some(operation), Some(numbers)) => (operation, numbers),
        _ => {
            return Err(OperationError::MissingParameters {
                required: AGGREGATE_REQUIRED,
            })
        }
    };

    if numbers.is_empty() {
        return Err(OperationError::EmptySequence);
    }

    let values = numbers
        .iter()
        .map(|operand| match operand {
            RawOperand::Number(_) => operand.to_finite(),
            _ => None,
        })
        .collect::<Option<Vec<f64>>>()
        .ok_or(OperationError::InvalidNumeric {
            family: OperationFamily::Aggregate,
        })?;

    let op: AggregateOp = operation.parse()?;
    let result = op.apply(&values)?;

    debug!(operation = ?op, count = values.len(), result, "Aggregate computed");

    Ok(AggregateOutcome {
        operation: operation.to_string(),
        count: values.len(),
        numbers: values,
        result,
        timestamp: Utc::now(),
    })
}

/// Raise `base` to `exponent`
pub fn calculate_power(base: &RawOperand, exponent: &RawOperand) -> Result<PowerOutcome> {
    if base.is_missing() || exponent.is_missing() {
        return Err(OperationError::MissingParameters {
            required: POWER_REQUIRED,
        });
    }

    let (base, exponent) = match (base.to_finite(), exponent.to_finite()) {
        (Some(base), Some(exponent)) => (base, exponent),
        _ => {
            return Err(OperationError::InvalidNumeric {
                family: OperationFamily::Power,
            })
        }
    };

    let result = operation::power(base, exponent)?;

    Ok(PowerOutcome {
        operation: "power",
        base,
        exponent,
        result,
        expression: format!("{}^{}", format_operand(base), format_operand(exponent)),
        timestamp: Utc::now(),
    })
}

/// Compute n! for `0 <= n <= 170`
///
/// `n` must be a whole integer in text form; anything else, including an
/// absent value, is out of range.
pub fn calculate_factorial(n: Option<&str>) -> Result<FactorialOutcome> {
    let out_of_range = || OperationError::InvalidRange {
        max: MAX_FACTORIAL_INPUT,
    };

    let input = n
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value <= MAX_FACTORIAL_INPUT)
        .ok_or_else(out_of_range)?;

    let result = operation::factorial(input)?;

    Ok(FactorialOutcome {
        operation: "factorial",
        input,
        result,
        expression: format!("{}!", input),
        timestamp: Utc::now(),
    })
}

/// Render a number the way JSON clients print it
///
/// Magnitudes of 1e21 and above, or below 1e-6, switch to exponent form with
/// an explicit sign (`1e+300`, `1e-7`); everything else is positional.
fn format_operand(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && (magnitude >= 1e21 || magnitude < 1e-6) {
        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        }
    } else {
        format!("{}", value)
    }
}

fn require_operation<'a>(operation: Option<&'a str>, required: &'static str) -> Result<&'a str> {
    operation
        .filter(|op| !op.is_empty())
        .ok_or(OperationError::MissingParameters { required })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawOperand {
        RawOperand::Text(s.to_string())
    }

    fn numbers(values: &[f64]) -> Vec<RawOperand> {
        values.iter().copied().map(RawOperand::Number).collect()
    }

    #[test]
    fn test_binary_add() {
        let outcome = calculate_binary(Some("add"), &text("5"), &text("3")).unwrap();
        assert_eq!(outcome.operation, "add");
        assert_eq!(outcome.operands, Operands { a: 5.0, b: 3.0 });
        assert_eq!(outcome.result, 8.0);
    }

    #[test]
    fn test_binary_echoes_operation_as_given() {
        let outcome = calculate_binary(Some("MULTIPLY"), &text("4"), &text("2.5")).unwrap();
        assert_eq!(outcome.operation, "MULTIPLY");
        assert_eq!(outcome.result, 10.0);
    }

    #[test]
    fn test_binary_missing_operation() {
        let err = calculate_binary(None, &text("1"), &text("2")).unwrap_err();
        assert_eq!(err, OperationError::MissingParameters { required: BINARY_REQUIRED });

        let err = calculate_binary(Some(""), &text("1"), &text("2")).unwrap_err();
        assert!(matches!(err, OperationError::MissingParameters { .. }));
    }

    #[test]
    fn test_binary_absent_operand_is_invalid_numeric() {
        let err = calculate_binary(Some("add"), &RawOperand::Missing, &text("2")).unwrap_err();
        assert_eq!(err, OperationError::InvalidNumeric { family: OperationFamily::Binary });
    }

    #[test]
    fn test_binary_non_numeric_operand() {
        let err = calculate_binary(Some("add"), &text("five"), &text("2")).unwrap_err();
        assert_eq!(err, OperationError::InvalidNumeric { family: OperationFamily::Binary });
    }

    #[test]
    fn test_binary_operands_checked_before_operation_name() {
        let err = calculate_binary(Some("modulo"), &text("x"), &text("2")).unwrap_err();
        assert!(matches!(err, OperationError::InvalidNumeric { .. }));

        let err = calculate_binary(Some("modulo"), &text("1"), &text("2")).unwrap_err();
        assert!(matches!(err, OperationError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_binary_divide_by_zero() {
        let err = calculate_binary(Some("divide"), &text("10"), &text("0")).unwrap_err();
        assert_eq!(err, OperationError::DivisionByZero);
    }

    #[test]
    fn test_aggregate_sum_and_average() {
        let input = numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let sum = calculate_aggregate(Some("sum"), Some(input.as_slice())).unwrap();
        assert_eq!(sum.result, 15.0);
        assert_eq!(sum.count, 5);
        assert_eq!(sum.numbers, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let avg = calculate_aggregate(Some("Average"), Some(input.as_slice())).unwrap();
        assert_eq!(avg.result, 3.0);
        assert_eq!(avg.operation, "Average");
    }

    #[test]
    fn test_aggregate_empty_sequence() {
        let err = calculate_aggregate(Some("product"), Some(&[][..])).unwrap_err();
        assert_eq!(err, OperationError::EmptySequence);
    }

    #[test]
    fn test_aggregate_missing_inputs() {
        let input = numbers(&[1.0]);
        assert!(matches!(
            calculate_aggregate(None, Some(input.as_slice())),
            Err(OperationError::MissingParameters { required: AGGREGATE_REQUIRED })
        ));
        assert!(matches!(
            calculate_aggregate(Some("sum"), None),
            Err(OperationError::MissingParameters { .. })
        ));
    }

    #[test]
    fn test_aggregate_rejects_whole_request_on_bad_element() {
        let input = vec![
            RawOperand::Number(1.0),
            RawOperand::Text("2".into()),
            RawOperand::Number(3.0),
        ];
        let err = calculate_aggregate(Some("sum"), Some(input.as_slice())).unwrap_err();
        assert_eq!(err, OperationError::InvalidNumeric { family: OperationFamily::Aggregate });

        let input = vec![RawOperand::Number(1.0), RawOperand::Other];
        assert!(calculate_aggregate(Some("sum"), Some(input.as_slice())).is_err());
    }

    #[test]
    fn test_aggregate_unknown_operation() {
        let input = numbers(&[1.0, 2.0]);
        let err = calculate_aggregate(Some("median"), Some(input.as_slice())).unwrap_err();
        assert!(matches!(err, OperationError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_power() {
        let outcome = calculate_power(&RawOperand::Number(2.0), &RawOperand::Number(3.0)).unwrap();
        assert_eq!(outcome.result, 8.0);
        assert_eq!(outcome.expression, "2^3");
        assert_eq!(outcome.operation, "power");
    }

    #[test]
    fn test_power_accepts_numeric_text() {
        let outcome = calculate_power(&text("2.5"), &text("2")).unwrap();
        assert_eq!(outcome.result, 6.25);
        assert_eq!(outcome.expression, "2.5^2");
    }

    #[test]
    fn test_power_expression_uses_exponent_form_for_extreme_operands() {
        let outcome = calculate_power(&RawOperand::Number(1e300), &RawOperand::Number(1.0)).unwrap();
        assert_eq!(outcome.expression, "1e+300^1");

        let outcome = calculate_power(&RawOperand::Number(1e-7), &RawOperand::Number(2.0)).unwrap();
        assert_eq!(outcome.expression, "1e-7^2");

        let outcome = calculate_power(&text("-2.5e21"), &RawOperand::Number(0.0)).unwrap();
        assert_eq!(outcome.expression, "-2.5e+21^0");
    }

    #[test]
    fn test_format_operand_thresholds() {
        assert_eq!(format_operand(1e20), "100000000000000000000");
        assert_eq!(format_operand(1e21), "1e+21");
        assert_eq!(format_operand(0.000001), "0.000001");
        assert_eq!(format_operand(0.0), "0");
        assert_eq!(format_operand(-0.5), "-0.5");
    }

    #[test]
    fn test_power_errors() {
        assert!(matches!(
            calculate_power(&RawOperand::Missing, &RawOperand::Number(3.0)),
            Err(OperationError::MissingParameters { required: POWER_REQUIRED })
        ));
        assert_eq!(
            calculate_power(&text("two"), &RawOperand::Number(3.0)).unwrap_err(),
            OperationError::InvalidNumeric { family: OperationFamily::Power }
        );
        assert_eq!(
            calculate_power(&RawOperand::Number(0.0), &RawOperand::Number(-1.0)).unwrap_err(),
            OperationError::NonFiniteResult
        );
    }

    #[test]
    fn test_factorial() {
        let zero = calculate_factorial(Some("0")).unwrap();
        assert_eq!(zero.result, 1.0);
        assert_eq!(zero.expression, "0!");

        let five = calculate_factorial(Some("5")).unwrap();
        assert_eq!(five.result, 120.0);
        assert_eq!(five.input, 5);

        assert!(calculate_factorial(Some("170")).is_ok());
    }

    #[test]
    fn test_factorial_out_of_range() {
        for input in [None, Some(""), Some("-1"), Some("171"), Some("2.5"), Some("abc")] {
            assert_eq!(
                calculate_factorial(input).unwrap_err(),
                OperationError::InvalidRange { max: 170 },
                "input {:?} should be rejected",
                input
            );
        }
    }
}
