//! Property-Based Tests for the arithmetic invariants
//!
//! 1. FINITENESS: a successful result is always finite
//! 2. ACCURACY: scalar operations match direct arithmetic
//! 3. REJECTION: zero divisors and empty sequences never produce a result
//!
//! Uses proptest for property-based testing with arbitrary inputs.

use mathgate_core::{
    calculate_aggregate, calculate_binary, calculate_factorial, calculate_power, AggregateOp,
    BinaryOp, OperationError, RawOperand,
};
use proptest::prelude::*;

fn text(value: f64) -> RawOperand {
    RawOperand::Text(value.to_string())
}

// =============================================================================
// ACCURACY
// =============================================================================

proptest! {
    /// add, subtract and multiply agree with direct arithmetic
    #[test]
    fn prop_scalar_ops_match_arithmetic(
        a in -1.0e6f64..1.0e6,
        b in -1.0e6f64..1.0e6,
    ) {
        let cases = [
            ("add", a + b),
            ("subtract", a - b),
            ("multiply", a * b),
        ];

        for (name, expected) in cases {
            let outcome = calculate_binary(Some(name), &text(a), &text(b))
                .expect("finite operands should compute");
            let tolerance = 1e-9 * expected.abs().max(1.0);
            prop_assert!(
                (outcome.result - expected).abs() <= tolerance,
                "{} of {} and {} gave {}, expected {}",
                name, a, b, outcome.result, expected
            );
        }
    }

    /// Text operands round-trip through parsing unchanged
    #[test]
    fn prop_text_operands_parse_exactly(value in proptest::num::f64::NORMAL) {
        prop_assert_eq!(text(value).to_finite(), Some(value));
    }

    /// average lies between min and max
    #[test]
    fn prop_average_is_bounded(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..50)) {
        let avg = AggregateOp::Average.apply(&values).unwrap();
        let max = AggregateOp::Max.apply(&values).unwrap();
        let min = AggregateOp::Min.apply(&values).unwrap();

        prop_assert!(min <= avg + 1e-6 && avg <= max + 1e-6);
    }

    /// count and echoed numbers follow the request
    #[test]
    fn prop_aggregate_echoes_sequence(values in prop::collection::vec(-1.0e3f64..1.0e3, 1..50)) {
        let input: Vec<RawOperand> = values.iter().copied().map(RawOperand::Number).collect();
        let outcome = calculate_aggregate(Some("sum"), Some(input.as_slice())).unwrap();

        prop_assert_eq!(outcome.count, values.len());
        prop_assert_eq!(outcome.numbers, values);
    }
}

// =============================================================================
// REJECTION
// =============================================================================

proptest! {
    /// Dividing by zero is an error for every dividend
    #[test]
    fn prop_divide_by_zero_always_rejected(a in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(BinaryOp::Divide.apply(a, 0.0), Err(OperationError::DivisionByZero));
        prop_assert_eq!(
            calculate_binary(Some("divide"), &RawOperand::Number(a), &RawOperand::Number(0.0)).unwrap_err(),
            OperationError::DivisionByZero
        );
    }

    /// Factorial inputs above the limit are out of range
    #[test]
    fn prop_factorial_above_limit_rejected(n in 171i64..100_000) {
        prop_assert_eq!(
            calculate_factorial(Some(&n.to_string())).unwrap_err(),
            OperationError::InvalidRange { max: 170 }
        );
    }

    /// Negative factorial inputs are out of range
    #[test]
    fn prop_factorial_negative_rejected(n in i64::MIN..0) {
        prop_assert!(matches!(
            calculate_factorial(Some(&n.to_string())),
            Err(OperationError::InvalidRange { .. })
        ), "expected InvalidRange error");
    }
}

// =============================================================================
// FINITENESS
// =============================================================================

proptest! {
    /// Every binary outcome that succeeds is finite
    #[test]
    fn prop_binary_results_are_finite(
        a in any::<f64>(),
        b in any::<f64>(),
        op in prop::sample::select(vec!["add", "subtract", "multiply", "divide"]),
    ) {
        if let Ok(outcome) = calculate_binary(Some(op), &RawOperand::Number(a), &RawOperand::Number(b)) {
            prop_assert!(outcome.result.is_finite());
        }
    }

    /// Every power outcome that succeeds is finite
    #[test]
    fn prop_power_results_are_finite(base in any::<f64>(), exponent in any::<f64>()) {
        if let Ok(outcome) = calculate_power(&RawOperand::Number(base), &RawOperand::Number(exponent)) {
            prop_assert!(outcome.result.is_finite());
        }
    }

    /// Every aggregate that succeeds is finite
    #[test]
    fn prop_aggregate_results_are_finite(
        values in prop::collection::vec(any::<f64>(), 1..20),
        op in prop::sample::select(vec!["sum", "product", "average", "max", "min"]),
    ) {
        let input: Vec<RawOperand> = values.into_iter().map(RawOperand::Number).collect();
        if let Ok(outcome) = calculate_aggregate(Some(op), Some(input.as_slice())) {
            prop_assert!(outcome.result.is_finite());
        }
    }

    /// Factorial is finite and positive across the whole valid range
    #[test]
    fn prop_factorial_in_range_is_finite(n in 0u32..=170) {
        let outcome = calculate_factorial(Some(&n.to_string())).unwrap();
        prop_assert!(outcome.result.is_finite() && outcome.result >= 1.0);
    }
}
