//! Expression engine: tokenizer, parser, value arithmetic and evaluator
//!
//! The input controller treats this module as a black box behind the
//! [`ExpressionEngine`] trait. [`Evaluator`] is the bundled implementation.

pub mod evaluator;
pub mod functions;
mod operations;
pub mod parser;
pub mod value;

pub use evaluator::{Evaluator, ExpressionEngine};
pub use functions::Function;
pub use operations::{Arithmetic, Operation};
pub use value::{Complex, Matrix, Value};

use thiserror::Error;

/// Result type for engine operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Engine error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,

    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),

    /// Identifier that is neither a constant nor a known function
    #[error("Undefined symbol: {0}")]
    UnknownSymbol(String),

    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Matrix operands with incompatible shapes
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Operation not defined for the operand types
    #[error("Unsupported operand: {0}")]
    Unsupported(String),

    /// Invalid result (NaN or infinity)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl CalcError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Create a dimension mismatch error
    #[must_use]
    pub fn dimension(message: impl Into<String>) -> Self {
        Self::DimensionMismatch(message.into())
    }

    /// Create an unsupported operand error
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_division_by_zero() {
        let err = CalcError::DivisionByZero;
        assert_eq!(format!("{err}"), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_parse_error() {
        let err = CalcError::parse("unexpected token");
        assert_eq!(format!("{err}"), "Invalid expression: unexpected token");
    }

    #[test]
    fn test_calc_error_display_unknown_symbol() {
        let err = CalcError::UnknownSymbol("foo".into());
        assert_eq!(format!("{err}"), "Undefined symbol: foo");
    }

    #[test]
    fn test_calc_error_display_dimension() {
        let err = CalcError::dimension("2x2 vs 3x3");
        assert_eq!(format!("{err}"), "Dimension mismatch: 2x2 vs 3x3");
    }

    #[test]
    fn test_calc_error_display_empty_expression() {
        assert_eq!(format!("{}", CalcError::EmptyExpression), "Empty expression");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }
}
