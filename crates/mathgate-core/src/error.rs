//! Error types for the operation dispatcher

use thiserror::Error;

use crate::operation::OperationFamily;

/// Result type alias using OperationError
pub type Result<T> = std::result::Result<T, OperationError>;

/// Errors that reject an operation request before any result is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// A required input was absent
    #[error("Missing parameters. Required: {required}")]
    MissingParameters {
        /// Human-readable list of the required inputs
        required: &'static str,
    },

    /// An operand could not be parsed as a finite number
    #[error("{}", .family.invalid_numeric_message())]
    InvalidNumeric { family: OperationFamily },

    /// Factorial input outside 0..=170 or not an integer
    #[error("n must be a non-negative integer less than or equal to {max}")]
    InvalidRange { max: u32 },

    /// Division with a zero divisor
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    /// The computation overflowed or is undefined
    #[error("Result is not finite")]
    NonFiniteResult,

    /// An aggregate was requested over an empty sequence
    #[error("Numbers array cannot be empty")]
    EmptySequence,

    /// The operation name is not part of the family
    #[error("Invalid operation. Supported: {}", .family.supported_operations())]
    UnsupportedOperation {
        family: OperationFamily,
        /// The name as supplied by the caller
        name: String,
    },
}

impl OperationError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            OperationError::MissingParameters { .. } => "MISSING_PARAMETERS",
            OperationError::InvalidNumeric { .. } => "INVALID_NUMERIC",
            OperationError::InvalidRange { .. } => "INVALID_RANGE",
            OperationError::DivisionByZero => "DIVISION_BY_ZERO",
            OperationError::NonFiniteResult => "NON_FINITE_RESULT",
            OperationError::EmptySequence => "EMPTY_SEQUENCE",
            OperationError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
        }
    }
}
