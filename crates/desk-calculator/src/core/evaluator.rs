//! AST evaluator

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcResult, Calculator, Operation};

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator {
    calculator: Calculator,
}

impl Evaluator {
    /// Creates a new evaluator rounding to the default precision
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
        }
    }

    /// Creates an evaluator rounding results to `precision` decimal places
    #[must_use]
    pub fn with_precision(precision: u32) -> Self {
        Self {
            calculator: Calculator::with_precision(precision),
        }
    }

    /// Evaluates an AST node and returns the unrounded result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => {
                let value = self.evaluate(inner)?;
                self.calculator.calculate(value, -1.0, Operation::Multiply)
            }
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                self.calculator.calculate(left_val, right_val, *op)
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    /// Parses, evaluates and rounds a string expression
    pub fn evaluate_rounded(&self, input: &str) -> CalcResult<f64> {
        self.evaluate_str(input).map(|v| self.calculator.round(v))
    }

    /// Returns the underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}
