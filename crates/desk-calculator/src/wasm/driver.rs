//! Native driver for the rendering path
//!
//! Pairs a [`CalculatorEngine`] with a [`MockDom`] and keeps the page in
//! sync the way the browser binding does: every key press or click is
//! forwarded to the engine and the three display regions are re-rendered.

use tracing::trace;

use super::dom::{
    DomElement, DomEvent, MockDom, CALCULATION_ID, ERROR_CLASS, HISTORY_ID, HISTORY_ITEM_CLASS,
    RESULT_ID,
};
use super::keypad::{MockDomKeypadExt, WasmKeypad};
use crate::config::{ConfigError, EngineConfig};
use crate::engine::{CalculatorEngine, Clock, InputEvent, SystemClock};

/// Engine plus mock page
#[derive(Debug)]
pub struct WasmDriver<C: Clock = SystemClock> {
    engine: CalculatorEngine<C>,
    dom: MockDom,
    keypad: WasmKeypad,
}

impl Default for WasmDriver<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver<SystemClock> {
    /// Creates a driver with a default engine
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(CalculatorEngine::new())
    }
}

impl<C: Clock> WasmDriver<C> {
    /// Creates a driver around an engine with the given config and clock
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(CalculatorEngine::with_clock(config, clock)?))
    }

    /// Creates a driver around an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine<C>) -> Self {
        let keypad = WasmKeypad::new();
        let mut dom = MockDom::calculator();
        dom.add_keypad(&keypad);
        let mut driver = Self {
            engine,
            dom,
            keypad,
        };
        driver.sync_dom();
        driver
    }

    /// The engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine<C> {
        &self.engine
    }

    /// The page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The keypad
    #[must_use]
    pub fn keypad(&self) -> &WasmKeypad {
        &self.keypad
    }

    /// Simulates a document `keydown`; returns false for unbound keys
    pub fn press_key(&mut self, key: &str) -> bool {
        self.dom.dispatch_event(DomEvent::key_down(key));
        match InputEvent::from_key(key) {
            Some(event) => {
                self.input(event);
                true
            }
            None => {
                trace!(key, "unbound key");
                false
            }
        }
    }

    /// Presses each key in turn
    pub fn press_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.press_key(key);
        }
    }

    /// Types every character of `text` as a key press
    pub fn type_keys(&mut self, text: &str) {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.press_key(ch.encode_utf8(&mut buf));
        }
    }

    /// Simulates a button click; returns false for unknown ids
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom.dispatch_event(DomEvent::click(element_id));
        match self.keypad.handle_click(element_id) {
            Some(event) => {
                self.input(event);
                true
            }
            None => false,
        }
    }

    /// Sends an event straight to the engine and re-renders
    pub fn input(&mut self, event: InputEvent) {
        self.engine.on_input(event);
        self.sync_dom();
    }

    /// Lets a due error recovery fire; re-renders when it does
    pub fn poll(&mut self) -> bool {
        let fired = self.engine.poll();
        if fired {
            self.sync_dom();
        }
        fired
    }

    fn sync_dom(&mut self) {
        let snapshot = self.engine.display_snapshot();
        let is_error = self.engine.is_error();

        if let Some(result) = self.dom.get_element_mut(RESULT_ID) {
            result.set_text(&snapshot.primary);
            result.toggle_class(ERROR_CLASS, is_error);
        }
        self.dom.set_element_text(CALCULATION_ID, &snapshot.secondary);

        self.dom.clear_children(HISTORY_ID);
        for line in self.engine.history() {
            let item = DomElement::new("div")
                .with_class(HISTORY_ITEM_CLASS)
                .with_text(&line);
            self.dom.append_child(HISTORY_ID, item);
        }
    }

    /// Text of the primary display
    #[must_use]
    pub fn result_text(&self) -> &str {
        self.dom.get_element_text(RESULT_ID).unwrap_or_default()
    }

    /// Text of the pending-expression display
    #[must_use]
    pub fn calculation_text(&self) -> &str {
        self.dom.get_element_text(CALCULATION_ID).unwrap_or_default()
    }

    /// Rendered history lines, most recent first
    #[must_use]
    pub fn history_items(&self) -> Vec<String> {
        self.dom.child_texts(HISTORY_ID)
    }

    /// Whether the primary display carries the error class
    #[must_use]
    pub fn shows_error(&self) -> bool {
        self.dom
            .get_element(RESULT_ID)
            .is_some_and(|e| e.has_class(ERROR_CLASS))
    }
}
