//! Tokenizer and precedence parser for flat infix expressions
//!
//! The engine builds strings such as `12+3*-4` from committed operands and
//! operators. There are no parentheses or functions; the only unary form is a
//! leading minus on an operand, which appears once the sign has been toggled.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or unary minus, decided by the parser)
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        match Operation::from_symbol(ch) {
            Some(op) => {
                self.advance();
                Ok(Some(Token::Operator(op)))
            }
            None => Err(CalcError::MalformedExpression(format!(
                "Unexpected character: '{ch}'"
            ))),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::MalformedExpression(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= '-' unary | NUMBER
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if self.pos < self.tokens.len() {
            return Err(CalcError::MalformedExpression(format!(
                "Unexpected token at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        match self.advance().cloned() {
            Some(Token::Number(n)) => Ok(AstNode::number(n)),
            Some(Token::Operator(Operation::Subtract)) => {
                let inner = self.parse_unary()?;
                Ok(AstNode::negate(inner))
            }
            Some(Token::Operator(op)) => Err(CalcError::MalformedExpression(format!(
                "Unexpected operator '{op}'"
            ))),
            None => Err(CalcError::MalformedExpression(
                "Unexpected end of expression".into(),
            )),
        }
    }
}
