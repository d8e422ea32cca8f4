//! Core arithmetic: operators, tokenizer/parser, evaluator and history
//!
//! Everything in here is pure and owns no UI state; the engine composes it.

pub mod evaluator;
pub mod history;
mod operations;
pub mod parser;

pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Every variant is handled the same way by the engine (the display shows
/// `Error` until recovery); the variants exist for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The built expression is not valid arithmetic
    #[error("Invalid expression: {0}")]
    MalformedExpression(String),
    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is infinite or NaN
    #[error("Non-finite result: {0}")]
    NonFiniteResult(f64),
    /// The entry buffer does not hold a number
    #[error("Cannot parse '{0}' as a number")]
    ParseFailure(String),
}

impl CalcError {
    /// Returns true for errors raised while reading the expression text
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::MalformedExpression(_) | Self::EmptyExpression | Self::ParseFailure(_)
        )
    }
}

/// Parses an entry buffer into a number.
///
/// Accepts what the entry can hold: an optional leading `-`, digits and at
/// most one `.` (`"5."` and `"-0."` are valid). Anything else, including a
/// lone `-`, is a [`CalcError::ParseFailure`].
pub fn parse_entry(entry: &str) -> CalcResult<f64> {
    let digits = entry.strip_prefix('-').unwrap_or(entry);
    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;

    if !well_formed {
        return Err(CalcError::ParseFailure(entry.to_string()));
    }

    entry
        .parse::<f64>()
        .map_err(|_| CalcError::ParseFailure(entry.to_string()))
}
