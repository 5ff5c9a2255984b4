//! # Mathgate Core
//!
//! Operation dispatch for the mathgate arithmetic service.
//!
//! ## Operation Families
//!
//! - **Binary**: add, subtract, multiply, divide over two scalar operands
//! - **Aggregate**: sum, product, average, max, min over a non-empty sequence
//! - **Power**: base^exponent
//! - **Factorial**: n! for 0 <= n <= 170
//!
//! ## Invariants
//!
//! 1. Every returned result is finite; anything else is rejected as an error
//! 2. Validation happens before computation and short-circuits on the first failure

pub mod dispatch;
pub mod error;
pub mod operation;
pub mod types;

pub use dispatch::{calculate_aggregate, calculate_binary, calculate_factorial, calculate_power};
pub use error::{OperationError, Result};
pub use operation::{AggregateOp, BinaryOp, OperationFamily, MAX_FACTORIAL_INPUT};
pub use types::{
    AggregateOutcome, BinaryOutcome, FactorialOutcome, Operands, PowerOutcome, RawOperand,
};

