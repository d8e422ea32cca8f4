//! Desk Calculator - keypad calculator engine
//!
//! The state machine behind a browser desk calculator: digits, operators,
//! memory keys and `=` go in as [`InputEvent`](engine::InputEvent)s, and a
//! primary/secondary display snapshot plus a short history come out.
//!
//! Expressions are built left to right as the user types and evaluated with
//! normal precedence by a small tokenizer, parser and AST evaluator. A failed
//! evaluation shows `Error` for a moment and then resets itself.
//!
//! # Example
//!
//! ```rust
//! use desk_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.digit(5);
//! engine.operator(Operation::Add);
//! engine.operator(Operation::Subtract);
//! engine.digit(3);
//! engine.evaluate();
//!
//! assert_eq!(engine.display_snapshot().primary, "2");
//! assert_eq!(engine.history(), vec!["5-3 = 2"]);
//! ```
//!
//! # Features
//!
//! - `wasm`: `wasm-bindgen` export of the engine (`BrowserCalculator`)

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod engine;
pub mod format;
pub mod logging;

/// Rendering layer: keypad, mock DOM and (with `wasm`) the browser binding
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{parse_entry, CalcError, CalcResult, Calculator, Operation};
    pub use crate::engine::{
        CalculatorEngine, Clock, DisplaySnapshot, InputEvent, ManualClock, SystemClock,
    };
    pub use crate::format::{group_thousands, number_to_entry, strip_separator};
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver, WasmKeypad};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}
