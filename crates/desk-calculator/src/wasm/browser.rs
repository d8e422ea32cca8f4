//! Browser bindings
//!
//! Exposes the engine to JavaScript. The page forwards `keydown` events and
//! button clicks, calls `poll()` from a `setInterval` (or before each
//! repaint), and re-renders from the getters.

use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{console, Performance};

use crate::config::EngineConfig;
use crate::engine::{CalculatorEngine, Clock, InputEvent};
use crate::wasm::keypad::WasmKeypad;

/// Clock backed by `performance.now()`
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    /// Uses the current window's `performance` object
    pub fn from_window() -> Result<Self, JsValue> {
        let performance = web_sys::window()
            .and_then(|w| w.performance())
            .ok_or_else(|| JsValue::from_str("window.performance is not available"))?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        millis_to_duration(self.performance.now())
    }
}

fn millis_to_duration(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Calculator exported to JavaScript
///
/// The `Error` display only clears when `poll()` runs: the page must call it
/// from a `setInterval` (or each animation frame) and re-render when it
/// returns true. Without it the error stays until the next key.
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: CalculatorEngine<PerformanceClock>,
    keypad: WasmKeypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a calculator from a JSON configuration
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config = EngineConfig::from_json(json).map_err(to_js_error)?;
        Self::with_config(config)
    }

    /// Handles a `KeyboardEvent.key`; returns false if the key is unbound
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(event) = InputEvent::from_key(key) else {
            return false;
        };
        self.engine.on_input(event);
        true
    }

    /// Handles a keypad button click by element id
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        let Some(event) = self.keypad.handle_click(button_id) else {
            return false;
        };
        self.engine.on_input(event);
        true
    }

    /// Fires the error recovery if due; returns true when the display changed
    pub fn poll(&mut self) -> bool {
        self.engine.poll()
    }

    /// Text for the primary display
    #[wasm_bindgen(getter)]
    pub fn primary(&self) -> String {
        self.engine.display_snapshot().primary
    }

    /// Text for the pending-expression display
    #[wasm_bindgen(getter)]
    pub fn secondary(&self) -> String {
        self.engine.display_snapshot().secondary
    }

    /// Whether the display shows `Error`
    #[wasm_bindgen(getter, js_name = isError)]
    pub fn is_error(&self) -> bool {
        self.engine.is_error()
    }

    /// Memory slot value
    #[wasm_bindgen(getter)]
    pub fn memory(&self) -> f64 {
        self.engine.memory()
    }

    /// Milliseconds until the error display clears
    #[wasm_bindgen(js_name = recoveryRemainingMs)]
    pub fn recovery_remaining_ms(&self) -> Option<f64> {
        self.engine
            .recovery_remaining()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    /// History lines, most recent first
    #[wasm_bindgen(js_name = historyLines)]
    pub fn history_lines(&self) -> Vec<String> {
        self.engine.history()
    }

    /// History records as JSON, most recent first
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsValue> {
        self.engine.history_log().to_json().map_err(to_js_error)
    }

    /// Display snapshot as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.display_snapshot()).map_err(to_js_error)
    }
}

impl BrowserCalculator {
    fn with_config(config: EngineConfig) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();
        let engine = CalculatorEngine::with_clock(config, PerformanceClock::from_window()?)
            .map_err(to_js_error)?;
        Ok(Self {
            engine,
            keypad: WasmKeypad::new(),
        })
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"desk-calculator initialized".into());
}
