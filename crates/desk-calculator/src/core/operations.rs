//! Binary operators and checked arithmetic

use crate::core::{CalcError, CalcResult};

/// The four operators a keypad can commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator character used in the pending expression
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps an operator character back to an operation
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the precedence level (higher = evaluated first)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Checked arithmetic with result rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    /// Decimal places kept by [`Calculator::round`]
    precision: u32,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Default number of decimal places kept in results
    pub const DEFAULT_PRECISION: u32 = 8;

    /// Creates a calculator rounding to [`Self::DEFAULT_PRECISION`] places
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
        }
    }

    /// Creates a calculator rounding to `precision` decimal places
    #[must_use]
    pub const fn with_precision(precision: u32) -> Self {
        Self { precision }
    }

    /// Returns the rounding precision
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Performs an operation on two operands
    pub fn calculate(&self, a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_finite(a / b)
    }

    /// Rounds to the configured number of decimal places.
    ///
    /// Values too large to scale are returned unchanged; at that magnitude
    /// there is no fractional part left to round anyway.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = scaled.round() / factor;
        // -0 would render as "-0"
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    fn check_finite(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::NonFiniteResult(result))
        }
    }
}
