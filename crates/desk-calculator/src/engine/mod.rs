//! Calculator engine: the keypad state machine
//!
//! The engine owns the entry buffer, the pending expression, the memory slot
//! and the history. A rendering layer feeds it [`InputEvent`]s and reads a
//! [`DisplaySnapshot`] after each one.
//!
//! # Error state
//!
//! A failed evaluation (or `%` on an unparsable entry) puts the engine into
//! an error state: the primary display reads `Error` and a recovery is
//! scheduled `error_recovery_ms` later. The host calls [`CalculatorEngine::poll`]
//! (from a timer, or before each repaint) to let it fire. Any input during the
//! window cancels the pending recovery, resets immediately and is then handled
//! as usual.

mod clock;
mod event;
mod recovery;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::InputEvent;
pub use recovery::{ErrorRecovery, PendingRecovery};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::core::evaluator::Evaluator;
use crate::core::history::History;
use crate::core::{parse_entry, CalcError, Calculator, Operation};
use crate::format::{group_thousands, number_to_entry, ERROR_TEXT};

/// What the display shows after an input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Formatted entry, or `Error`
    pub primary: String,
    /// Pending expression as-is
    pub secondary: String,
}

/// Keypad calculator state machine
#[derive(Debug)]
pub struct CalculatorEngine<C: Clock = SystemClock> {
    config: EngineConfig,
    /// Operand being typed; never empty
    entry: String,
    /// Committed `operand op operand op ...` text
    pending: String,
    last_input_was_operator: bool,
    memory: f64,
    history: History,
    evaluator: Evaluator,
    recovery: ErrorRecovery,
    clock: C,
}

impl Default for CalculatorEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine<SystemClock> {
    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), SystemClock::new())
    }

    /// Creates an engine with a custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> CalculatorEngine<C> {
    /// Creates an engine driven by the given clock
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: EngineConfig, clock: C) -> Self {
        Self {
            entry: "0".to_string(),
            pending: String::new(),
            last_input_was_operator: false,
            memory: 0.0,
            history: History::with_capacity(config.history_capacity),
            evaluator: Evaluator::with_precision(config.result_precision),
            recovery: ErrorRecovery::new(config.error_recovery_delay()),
            clock,
            config,
        }
    }

    // ===== Input =====

    /// Handles one input event
    pub fn on_input(&mut self, event: InputEvent) {
        if let Some(cause) = self.recovery.cancel() {
            debug!(%cause, ?event, "input during error display, recovering early");
            self.reset_expression();
        }
        trace!(?event, entry = %self.entry, pending = %self.pending, "input");

        match event {
            InputEvent::Digit(d) => self.apply_digit(d),
            InputEvent::DecimalPoint => self.apply_decimal_point(),
            InputEvent::Operator(op) => self.apply_operator(op),
            InputEvent::Evaluate => self.apply_evaluate(),
            InputEvent::Percent => self.apply_percent(),
            InputEvent::ToggleSign => self.apply_toggle_sign(),
            InputEvent::ClearAll => self.reset_expression(),
            InputEvent::ClearEntry => self.reset_entry(),
            InputEvent::Backspace => self.apply_backspace(),
            InputEvent::MemoryStore => self.apply_memory(|_, v| Ok(v)),
            InputEvent::MemoryAdd => self.apply_memory(Calculator::add),
            InputEvent::MemorySubtract => self.apply_memory(Calculator::subtract),
            InputEvent::MemoryRecall => self.apply_memory_recall(),
            InputEvent::MemoryClear => self.memory = 0.0,
        }
    }

    /// Types a digit (0-9)
    pub fn digit(&mut self, d: u8) {
        self.on_input(InputEvent::Digit(d));
    }

    /// Types a decimal point
    pub fn decimal_point(&mut self) {
        self.on_input(InputEvent::DecimalPoint);
    }

    /// Commits the entry with an operator, or swaps the last operator
    pub fn operator(&mut self, op: Operation) {
        self.on_input(InputEvent::Operator(op));
    }

    /// Evaluates the pending expression
    pub fn evaluate(&mut self) {
        self.on_input(InputEvent::Evaluate);
    }

    /// Divides the entry by 100
    pub fn percent(&mut self) {
        self.on_input(InputEvent::Percent);
    }

    /// Flips the sign of the entry
    pub fn toggle_sign(&mut self) {
        self.on_input(InputEvent::ToggleSign);
    }

    /// Resets entry and pending expression (memory and history survive)
    pub fn clear_all(&mut self) {
        self.on_input(InputEvent::ClearAll);
    }

    /// Resets the entry only
    pub fn clear_entry(&mut self) {
        self.on_input(InputEvent::ClearEntry);
    }

    /// Removes the last character of the entry
    pub fn backspace(&mut self) {
        self.on_input(InputEvent::Backspace);
    }

    /// Stores the entry in memory
    pub fn memory_store(&mut self) {
        self.on_input(InputEvent::MemoryStore);
    }

    /// Writes memory into the entry
    pub fn memory_recall(&mut self) {
        self.on_input(InputEvent::MemoryRecall);
    }

    /// Adds the entry to memory
    pub fn memory_add(&mut self) {
        self.on_input(InputEvent::MemoryAdd);
    }

    /// Subtracts the entry from memory
    pub fn memory_subtract(&mut self) {
        self.on_input(InputEvent::MemorySubtract);
    }

    /// Resets memory to zero
    pub fn memory_clear(&mut self) {
        self.on_input(InputEvent::MemoryClear);
    }

    // ===== Time =====

    /// Fires the error recovery if its deadline has passed.
    ///
    /// Returns true when the display was reset.
    pub fn poll(&mut self) -> bool {
        match self.recovery.take_due(self.clock.now()) {
            Some(cause) => {
                debug!(%cause, "error display expired, recovering");
                self.reset_expression();
                true
            }
            None => false,
        }
    }

    /// Time left before the error display clears, if in the error state
    #[must_use]
    pub fn recovery_remaining(&self) -> Option<Duration> {
        self.recovery.remaining(self.clock.now())
    }

    // ===== Queries =====

    /// Returns what the display should show now
    #[must_use]
    pub fn display_snapshot(&self) -> DisplaySnapshot {
        let primary = if self.is_error() {
            ERROR_TEXT.to_string()
        } else {
            group_thousands(&self.entry, self.config.thousands_separator)
        };
        DisplaySnapshot {
            primary,
            secondary: self.pending.clone(),
        }
    }

    /// Returns history lines, most recent first
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lines()
    }

    /// Returns the full history records
    #[must_use]
    pub fn history_log(&self) -> &History {
        &self.history
    }

    /// The raw entry buffer
    #[must_use]
    pub fn current_entry(&self) -> &str {
        &self.entry
    }

    /// The raw pending expression
    #[must_use]
    pub fn pending_expression(&self) -> &str {
        &self.pending
    }

    /// Whether the next digit starts a new operand
    #[must_use]
    pub fn last_input_was_operator(&self) -> bool {
        self.last_input_was_operator
    }

    /// The memory slot
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Whether the display is showing `Error`
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.recovery.is_pending()
    }

    /// The failure behind the current error display
    #[must_use]
    pub fn error_cause(&self) -> Option<&CalcError> {
        self.recovery.pending().map(|p| &p.cause)
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's clock
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ===== Transitions =====

    fn apply_digit(&mut self, d: u8) {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            trace!(d, "ignoring non-decimal digit");
            return;
        };

        if self.entry == "0" || self.last_input_was_operator {
            self.entry = ch.to_string();
            self.last_input_was_operator = false;
        } else if self.entry.len() < self.config.max_entry_len {
            self.entry.push(ch);
        }
    }

    fn apply_decimal_point(&mut self) {
        if self.last_input_was_operator {
            self.entry = "0.".to_string();
            self.last_input_was_operator = false;
        } else if !self.entry.contains('.') {
            self.entry.push('.');
        }
    }

    fn apply_operator(&mut self, op: Operation) {
        if self.last_input_was_operator {
            self.pending.pop();
        } else {
            self.pending.push_str(&self.entry);
            self.last_input_was_operator = true;
        }
        self.pending.push(op.symbol());
    }

    fn apply_evaluate(&mut self) {
        let expression = if self.last_input_was_operator {
            let mut expr = self.pending.clone();
            expr.pop();
            expr
        } else {
            format!("{}{}", self.pending, self.entry)
        };

        match self.evaluator.evaluate_rounded(&expression) {
            Ok(result) => {
                debug!(%expression, result, "evaluated");
                self.history.record(&expression, result);
                self.entry = number_to_entry(result);
                self.pending.clear();
                self.last_input_was_operator = false;
            }
            Err(cause) => self.enter_error(cause),
        }
    }

    fn apply_percent(&mut self) {
        match parse_entry(&self.entry) {
            Ok(value) => self.entry = number_to_entry(value / 100.0),
            Err(cause) => self.enter_error(cause),
        }
    }

    fn apply_toggle_sign(&mut self) {
        if self.entry == "0" {
            return;
        }
        if let Some(unsigned) = self.entry.strip_prefix('-') {
            self.entry = if unsigned.is_empty() {
                "0".to_string()
            } else {
                unsigned.to_string()
            };
        } else {
            self.entry.insert(0, '-');
        }
    }

    fn apply_backspace(&mut self) {
        self.entry.pop();
        if self.entry.is_empty() {
            self.entry.push('0');
        }
    }

    /// Combines memory with the parsed entry; unparsable entries and
    /// non-finite results leave memory untouched
    fn apply_memory(&mut self, combine: fn(f64, f64) -> Result<f64, CalcError>) {
        let updated = parse_entry(&self.entry).and_then(|value| combine(self.memory, value));
        match updated {
            Ok(value) => self.memory = value,
            Err(cause) => debug!(%cause, entry = %self.entry, "memory operation ignored"),
        }
    }

    fn apply_memory_recall(&mut self) {
        self.entry = number_to_entry(self.memory);
    }

    fn enter_error(&mut self, cause: CalcError) {
        debug!(%cause, entry = %self.entry, pending = %self.pending, "entering error state");
        self.recovery.schedule(self.clock.now(), cause);
    }

    fn reset_entry(&mut self) {
        self.entry.clear();
        self.entry.push('0');
    }

    fn reset_expression(&mut self) {
        self.reset_entry();
        self.pending.clear();
        self.last_input_was_operator = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> (CalculatorEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = CalculatorEngine::with_clock(EngineConfig::default(), clock.clone()).unwrap();
        (engine, clock)
    }

    fn type_digits(engine: &mut CalculatorEngine<ManualClock>, digits: &str) {
        for ch in digits.chars() {
            match ch {
                '.' => engine.decimal_point(),
                d => engine.digit(d.to_digit(10).unwrap() as u8),
            }
        }
    }

    // ===== Initial state =====

    #[test]
    fn test_initial_state() {
        let (engine, _) = engine();
        assert_eq!(engine.current_entry(), "0");
        assert_eq!(engine.pending_expression(), "");
        assert!(!engine.last_input_was_operator());
        assert_eq!(engine.memory(), 0.0);
        assert!(engine.history().is_empty());
        assert!(!engine.is_error());
        assert_eq!(
            engine.display_snapshot(),
            DisplaySnapshot {
                primary: "0".into(),
                secondary: String::new()
            }
        );
    }

    #[test]
    fn test_default_engine() {
        let engine = CalculatorEngine::default();
        assert_eq!(engine.current_entry(), "0");
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EngineConfig::new().with_max_entry_len(0);
        assert!(CalculatorEngine::with_config(config).is_err());
    }

    // ===== Digits =====

    #[test]
    fn test_digit_replaces_zero() {
        let (mut engine, _) = engine();
        engine.digit(7);
        assert_eq!(engine.current_entry(), "7");
    }

    #[test]
    fn test_digits_concatenate() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "12345");
        assert_eq!(engine.current_entry(), "12345");
    }

    #[test]
    fn test_leading_zeros_collapse() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "0007");
        assert_eq!(engine.current_entry(), "7");
    }

    #[test]
    fn test_thirteenth_digit_dropped() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "123456789012");
        assert_eq!(engine.current_entry(), "123456789012");
        engine.digit(3);
        assert_eq!(engine.current_entry(), "123456789012");
    }

    #[test]
    fn test_entry_cap_follows_config() {
        let clock = ManualClock::new();
        let config = EngineConfig::new().with_max_entry_len(3);
        let mut engine = CalculatorEngine::with_clock(config, clock).unwrap();
        type_digits(&mut engine, "98765");
        assert_eq!(engine.current_entry(), "987");
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let (mut engine, _) = engine();
        engine.digit(4);
        engine.digit(10);
        engine.digit(255);
        assert_eq!(engine.current_entry(), "4");
    }

    #[test]
    fn test_digit_after_operator_starts_fresh() {
        let (mut engine, _) = engine();
        engine.digit(9);
        engine.operator(Operation::Add);
        engine.digit(4);
        assert_eq!(engine.current_entry(), "4");
        assert!(!engine.last_input_was_operator());
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_point_appends_once() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "3.1.4");
        assert_eq!(engine.current_entry(), "3.14");
    }

    #[test]
    fn test_decimal_point_on_zero() {
        let (mut engine, _) = engine();
        engine.decimal_point();
        engine.digit(5);
        assert_eq!(engine.current_entry(), "0.5");
    }

    #[test]
    fn test_decimal_point_after_operator() {
        let (mut engine, _) = engine();
        engine.digit(2);
        engine.operator(Operation::Multiply);
        engine.decimal_point();
        assert_eq!(engine.current_entry(), "0.");
        assert!(!engine.last_input_was_operator());
    }

    // ===== Operators =====

    #[test]
    fn test_operator_commits_entry() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "12");
        engine.operator(Operation::Add);
        assert_eq!(engine.pending_expression(), "12+");
        assert_eq!(engine.current_entry(), "12");
        assert!(engine.last_input_was_operator());
    }

    #[test]
    fn test_operator_substitution() {
        let (mut engine, _) = engine();
        engine.digit(5);
        engine.operator(Operation::Add);
        engine.operator(Operation::Subtract);
        engine.operator(Operation::Multiply);
        assert_eq!(engine.pending_expression(), "5*");
    }

    #[test]
    fn test_operator_chain() {
        let (mut engine, _) = engine();
        engine.digit(1);
        engine.operator(Operation::Add);
        engine.digit(2);
        engine.operator(Operation::Multiply);
        engine.digit(3);
        assert_eq!(engine.pending_expression(), "1+2*");
        assert_eq!(engine.display_snapshot().secondary, "1+2*");
    }

    // ===== Evaluate =====

    #[test]
    fn test_evaluate_with_substituted_operator() {
        let (mut engine, _) = engine();
        engine.digit(5);
        engine.operator(Operation::Add);
        engine.operator(Operation::Subtract);
        engine.digit(3);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "2");
        assert_eq!(engine.pending_expression(), "");
        assert_eq!(engine.history(), vec!["5-3 = 2"]);
    }

    #[test]
    fn test_evaluate_respects_precedence() {
        let (mut engine, _) = engine();
        engine.digit(2);
        engine.operator(Operation::Add);
        engine.digit(3);
        engine.operator(Operation::Multiply);
        engine.digit(4);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "14");
    }

    #[test]
    fn test_evaluate_drops_trailing_operator() {
        let (mut engine, _) = engine();
        engine.digit(8);
        engine.operator(Operation::Divide);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "8");
        assert_eq!(engine.history(), vec!["8 = 8"]);
    }

    #[test]
    fn test_evaluate_bare_entry() {
        let (mut engine, _) = engine();
        engine.digit(6);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "6");
        assert_eq!(engine.history(), vec!["6 = 6"]);
    }

    #[test]
    fn test_evaluate_rounds_result() {
        let (mut engine, _) = engine();
        engine.decimal_point();
        engine.digit(1);
        engine.operator(Operation::Add);
        engine.decimal_point();
        engine.digit(2);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "0.3");
        assert_eq!(engine.history(), vec!["0.1+0.2 = 0.3"]);
    }

    #[test]
    fn test_evaluate_with_negative_operand() {
        let (mut engine, _) = engine();
        engine.digit(5);
        engine.operator(Operation::Multiply);
        engine.digit(3);
        engine.toggle_sign();
        engine.evaluate();
        assert_eq!(engine.history(), vec!["5*-3 = -15"]);
        assert_eq!(engine.display_snapshot().primary, "-15");
    }

    #[test]
    fn test_subtract_negative_operand() {
        let (mut engine, _) = engine();
        engine.digit(5);
        engine.operator(Operation::Subtract);
        engine.digit(3);
        engine.toggle_sign();
        engine.evaluate();
        assert!(!engine.is_error());
        assert_eq!(engine.history(), vec!["5--3 = 8"]);
        assert_eq!(engine.current_entry(), "8");
    }

    #[test]
    fn test_digit_after_evaluate_appends_to_result() {
        let (mut engine, _) = engine();
        engine.digit(2);
        engine.operator(Operation::Add);
        engine.digit(2);
        engine.evaluate();
        engine.digit(1);
        assert_eq!(engine.current_entry(), "41");
    }

    #[test]
    fn test_result_feeds_next_calculation() {
        let (mut engine, _) = engine();
        engine.digit(6);
        engine.operator(Operation::Multiply);
        engine.digit(7);
        engine.evaluate();
        engine.operator(Operation::Subtract);
        engine.digit(2);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "40");
        assert_eq!(engine.history(), vec!["42-2 = 40", "6*7 = 42"]);
    }

    #[test]
    fn test_primary_display_groups_thousands() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "1234567.5");
        assert_eq!(engine.display_snapshot().primary, "1,234,567.5");
        assert_eq!(engine.current_entry(), "1234567.5");
    }

    // ===== History =====

    #[test]
    fn test_history_keeps_five_most_recent() {
        let (mut engine, _) = engine();
        for i in 1..=6u8 {
            engine.digit(i);
            engine.operator(Operation::Add);
            engine.digit(1);
            engine.evaluate();
            engine.clear_all();
        }
        let history = engine.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0], "6+1 = 7");
        assert_eq!(history[4], "2+1 = 3");
        assert!(!history.iter().any(|h| h.starts_with("1+1")));
    }

    // ===== Error state =====

    #[test]
    fn test_division_by_zero_enters_error() {
        let (mut engine, clock) = engine();
        engine.digit(1);
        engine.operator(Operation::Divide);
        engine.digit(0);
        engine.evaluate();

        assert!(engine.is_error());
        assert_eq!(engine.error_cause(), Some(&CalcError::DivisionByZero));
        assert_eq!(engine.display_snapshot().primary, "Error");
        assert!(engine.history().is_empty());

        clock.advance_ms(999);
        assert!(!engine.poll());
        assert_eq!(engine.display_snapshot().primary, "Error");
        assert_eq!(engine.recovery_remaining(), Some(Duration::from_millis(1)));

        clock.advance_ms(1);
        assert!(engine.poll());
        assert!(!engine.is_error());
        assert_eq!(engine.current_entry(), "0");
        assert_eq!(engine.pending_expression(), "");
        assert_eq!(engine.display_snapshot().primary, "0");
        assert_eq!(engine.recovery_remaining(), None);
    }

    #[test]
    fn test_poll_without_error_is_noop() {
        let (mut engine, clock) = engine();
        engine.digit(3);
        clock.advance_ms(5000);
        assert!(!engine.poll());
        assert_eq!(engine.current_entry(), "3");
    }

    #[test]
    fn test_error_keeps_memory_and_history() {
        let (mut engine, clock) = engine();
        engine.digit(9);
        engine.memory_store();
        engine.evaluate();
        engine.operator(Operation::Divide);
        engine.digit(0);
        engine.evaluate();
        clock.advance_ms(1000);
        engine.poll();
        assert_eq!(engine.memory(), 9.0);
        assert_eq!(engine.history(), vec!["9 = 9"]);
    }

    #[test]
    fn test_input_during_error_resets_then_applies() {
        let (mut engine, clock) = engine();
        engine.digit(4);
        engine.operator(Operation::Divide);
        engine.digit(0);
        engine.evaluate();
        assert!(engine.is_error());

        clock.advance_ms(200);
        engine.digit(7);
        assert!(!engine.is_error());
        assert_eq!(engine.current_entry(), "7");
        assert_eq!(engine.pending_expression(), "");

        // the cancelled recovery must not fire later
        clock.advance_ms(5000);
        assert!(!engine.poll());
        assert_eq!(engine.current_entry(), "7");
    }

    #[test]
    fn test_malformed_expression_enters_error() {
        let (mut engine, _) = engine();
        engine.digit(3);
        engine.operator(Operation::Add);
        engine.digit(5);
        engine.toggle_sign();
        engine.backspace();
        assert_eq!(engine.current_entry(), "-");
        engine.evaluate();
        assert!(matches!(
            engine.error_cause(),
            Some(CalcError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_overflow_enters_error() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "999999999999");
        for _ in 0..26 {
            engine.operator(Operation::Multiply);
            type_digits(&mut engine, "999999999999");
        }
        engine.evaluate();
        assert!(matches!(
            engine.error_cause(),
            Some(CalcError::NonFiniteResult(_))
        ));
    }

    #[test]
    fn test_recovery_delay_follows_config() {
        let clock = ManualClock::new();
        let config = EngineConfig::new().with_error_recovery_ms(50);
        let mut engine = CalculatorEngine::with_clock(config, clock.clone()).unwrap();
        engine.digit(1);
        engine.operator(Operation::Divide);
        engine.digit(0);
        engine.evaluate();
        clock.advance_ms(50);
        assert!(engine.poll());
    }

    // ===== Percent =====

    #[test]
    fn test_percent() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "50");
        engine.percent();
        assert_eq!(engine.current_entry(), "0.5");
        engine.percent();
        assert_eq!(engine.current_entry(), "0.005");
    }

    #[test]
    fn test_percent_of_negative() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "250");
        engine.toggle_sign();
        engine.percent();
        assert_eq!(engine.current_entry(), "-2.5");
    }

    #[test]
    fn test_percent_parse_failure_enters_error() {
        let (mut engine, _) = engine();
        engine.digit(5);
        engine.toggle_sign();
        engine.backspace();
        engine.percent();
        assert!(matches!(
            engine.error_cause(),
            Some(CalcError::ParseFailure(_))
        ));
        assert_eq!(engine.display_snapshot().primary, "Error");
    }

    // ===== Sign =====

    #[test]
    fn test_toggle_sign_twice_is_identity() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "12.5");
        engine.toggle_sign();
        assert_eq!(engine.current_entry(), "-12.5");
        engine.toggle_sign();
        assert_eq!(engine.current_entry(), "12.5");
    }

    #[test]
    fn test_toggle_sign_on_zero_is_noop() {
        let (mut engine, _) = engine();
        engine.toggle_sign();
        assert_eq!(engine.current_entry(), "0");
    }

    #[test]
    fn test_toggle_sign_on_lone_minus() {
        let (mut engine, _) = engine();
        engine.digit(3);
        engine.toggle_sign();
        engine.backspace();
        engine.toggle_sign();
        assert_eq!(engine.current_entry(), "0");
    }

    // ===== Clearing =====

    #[test]
    fn test_clear_all_keeps_memory_and_history() {
        let (mut engine, _) = engine();
        engine.digit(2);
        engine.operator(Operation::Add);
        engine.digit(2);
        engine.evaluate();
        engine.memory_store();
        engine.operator(Operation::Multiply);
        engine.digit(3);
        engine.clear_all();

        assert_eq!(engine.current_entry(), "0");
        assert_eq!(engine.pending_expression(), "");
        assert!(!engine.last_input_was_operator());
        assert_eq!(engine.memory(), 4.0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let (mut engine, _) = engine();
        engine.digit(9);
        engine.operator(Operation::Subtract);
        engine.digit(4);
        engine.clear_entry();
        assert_eq!(engine.current_entry(), "0");
        assert_eq!(engine.pending_expression(), "9-");
        engine.digit(1);
        engine.evaluate();
        assert_eq!(engine.current_entry(), "8");
    }

    #[test]
    fn test_backspace() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "123");
        engine.backspace();
        assert_eq!(engine.current_entry(), "12");
        engine.backspace();
        engine.backspace();
        assert_eq!(engine.current_entry(), "0");
        engine.backspace();
        assert_eq!(engine.current_entry(), "0");
    }

    // ===== Memory =====

    #[test]
    fn test_memory_accumulates() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "10");
        engine.memory_store();
        engine.clear_entry();
        engine.digit(5);
        engine.memory_add();
        engine.clear_entry();
        engine.digit(2);
        engine.memory_subtract();
        assert_eq!(engine.memory(), 13.0);

        engine.clear_all();
        engine.memory_recall();
        assert_eq!(engine.current_entry(), "13");

        engine.memory_clear();
        assert_eq!(engine.memory(), 0.0);
    }

    #[test]
    fn test_memory_recall_keeps_operator_flag() {
        let (mut engine, _) = engine();
        engine.digit(4);
        engine.memory_store();
        engine.digit(0);
        engine.operator(Operation::Add);
        engine.memory_recall();
        assert_eq!(engine.current_entry(), "4");
        assert!(engine.last_input_was_operator());
        engine.evaluate();
        assert_eq!(engine.current_entry(), "40");
    }

    #[test]
    fn test_digit_after_recall_starts_new_operand() {
        let (mut engine, _) = engine();
        engine.digit(3);
        engine.memory_store();
        engine.clear_all();
        engine.digit(5);
        engine.operator(Operation::Add);
        engine.memory_recall();
        engine.digit(7);
        assert_eq!(engine.current_entry(), "7");
        assert_eq!(engine.pending_expression(), "5+");
    }

    #[test]
    fn test_operator_after_recall_substitutes() {
        let (mut engine, _) = engine();
        engine.digit(3);
        engine.memory_store();
        engine.clear_all();
        engine.digit(5);
        engine.operator(Operation::Add);
        engine.memory_recall();
        engine.operator(Operation::Multiply);
        assert_eq!(engine.pending_expression(), "5*");
    }

    #[test]
    fn test_memory_ops_ignore_unparsable_entry() {
        let (mut engine, _) = engine();
        engine.digit(6);
        engine.memory_store();
        engine.toggle_sign();
        engine.backspace();
        assert_eq!(engine.current_entry(), "-");
        engine.memory_store();
        engine.memory_add();
        engine.memory_subtract();
        assert_eq!(engine.memory(), 6.0);
        assert!(!engine.is_error());
    }

    #[test]
    fn test_memory_recall_of_fraction() {
        let (mut engine, _) = engine();
        type_digits(&mut engine, "2.5");
        engine.memory_store();
        engine.clear_all();
        engine.memory_recall();
        assert_eq!(engine.current_entry(), "2.5");
    }

    // ===== on_input dispatch =====

    #[test]
    fn test_on_input_matches_methods() {
        let (mut engine, _) = engine();
        for event in [
            InputEvent::Digit(1),
            InputEvent::Digit(2),
            InputEvent::Operator(Operation::Multiply),
            InputEvent::Digit(3),
            InputEvent::Evaluate,
        ] {
            engine.on_input(event);
        }
        assert_eq!(engine.current_entry(), "36");
        assert_eq!(engine.history(), vec!["12*3 = 36"]);
    }
}
