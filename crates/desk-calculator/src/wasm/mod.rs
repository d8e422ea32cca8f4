//! Rendering layer
//!
//! The keypad and mock DOM are always compiled so the rendering path can
//! be tested natively; the real browser binding needs the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, PerformanceClock};
pub use dom::{
    DomElement, DomEvent, MockDom, CALCULATION_ID, ERROR_CLASS, HISTORY_ID, HISTORY_ITEM_CLASS,
    RESULT_ID,
};
pub use driver::WasmDriver;
pub use keypad::{KeypadButtonDef, MockDomKeypadExt, WasmKeypad};
