//! On-screen keypad definition
//!
//! Maps button element ids to [`InputEvent`]s and builds the button
//! elements for the mock DOM.

use super::dom::{DomElement, MockDom};
use crate::core::Operation;
use crate::engine::InputEvent;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// Event sent to the engine when clicked
    pub event: InputEvent,
    /// DOM element id
    pub id: String,
    /// Text on the button
    pub label: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column of the left edge (0-indexed)
    pub col: usize,
    /// Number of columns the button covers
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a one-column button
    #[must_use]
    pub fn new(event: InputEvent, row: usize, col: usize) -> Self {
        Self {
            id: button_id(event),
            label: button_label(event),
            event,
            row,
            col,
            span: 1,
        }
    }

    /// Widens the button to cover `span` columns
    #[must_use]
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Whether the button covers the given grid cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

fn button_id(event: InputEvent) -> String {
    let name = match event {
        InputEvent::Digit(d) => return format!("btn-{d}"),
        InputEvent::DecimalPoint => "decimal",
        InputEvent::Operator(Operation::Add) => "plus",
        InputEvent::Operator(Operation::Subtract) => "minus",
        InputEvent::Operator(Operation::Multiply) => "times",
        InputEvent::Operator(Operation::Divide) => "divide",
        InputEvent::Evaluate => "equals",
        InputEvent::Percent => "percent",
        InputEvent::ToggleSign => "sign",
        InputEvent::ClearAll => "clear",
        InputEvent::ClearEntry => "clear-entry",
        InputEvent::Backspace => "backspace",
        InputEvent::MemoryStore => "ms",
        InputEvent::MemoryRecall => "mr",
        InputEvent::MemoryAdd => "mplus",
        InputEvent::MemorySubtract => "mminus",
        InputEvent::MemoryClear => "mc",
    };
    format!("btn-{name}")
}

fn button_label(event: InputEvent) -> String {
    let label = match event {
        InputEvent::Digit(d) => return d.to_string(),
        InputEvent::DecimalPoint => ".",
        InputEvent::Operator(Operation::Add) => "+",
        InputEvent::Operator(Operation::Subtract) => "−",
        InputEvent::Operator(Operation::Multiply) => "×",
        InputEvent::Operator(Operation::Divide) => "÷",
        InputEvent::Evaluate => "=",
        InputEvent::Percent => "%",
        InputEvent::ToggleSign => "±",
        InputEvent::ClearAll => "C",
        InputEvent::ClearEntry => "CE",
        InputEvent::Backspace => "⌫",
        InputEvent::MemoryStore => "MS",
        InputEvent::MemoryRecall => "MR",
        InputEvent::MemoryAdd => "M+",
        InputEvent::MemorySubtract => "M−",
        InputEvent::MemoryClear => "MC",
    };
    label.to_string()
}

/// Keypad layout
///
/// ```text
/// [MC] [MR] [M+] [M−]
/// [MS] [CE] [ C] [ ⌫]
/// [ 7] [ 8] [ 9] [ ÷]
/// [ 4] [ 5] [ 6] [ ×]
/// [ 1] [ 2] [ 3] [ −]
/// [ ±] [ 0] [ .] [ +]
/// [ %] [      =      ]
/// ```
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use InputEvent as E;

        let grid: [[E; 4]; 6] = [
            [
                E::MemoryClear,
                E::MemoryRecall,
                E::MemoryAdd,
                E::MemorySubtract,
            ],
            [
                E::MemoryStore,
                E::ClearEntry,
                E::ClearAll,
                E::Backspace,
            ],
            [
                E::Digit(7),
                E::Digit(8),
                E::Digit(9),
                E::Operator(Operation::Divide),
            ],
            [
                E::Digit(4),
                E::Digit(5),
                E::Digit(6),
                E::Operator(Operation::Multiply),
            ],
            [
                E::Digit(1),
                E::Digit(2),
                E::Digit(3),
                E::Operator(Operation::Subtract),
            ],
            [
                E::ToggleSign,
                E::Digit(0),
                E::DecimalPoint,
                E::Operator(Operation::Add),
            ],
        ];

        let mut buttons: Vec<KeypadButtonDef> = grid
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(move |(col, &event)| KeypadButtonDef::new(event, row, col))
            })
            .collect();
        buttons.push(KeypadButtonDef::new(E::Percent, 6, 0));
        buttons.push(KeypadButtonDef::new(E::Evaluate, 6, 1).with_span(3));

        Self {
            buttons,
            cols: 4,
            rows: 7,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that sends an event
    #[must_use]
    pub fn find_button_by_event(&self, event: InputEvent) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Maps a clicked element id to its event
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<InputEvent> {
        self.find_button_by_id(element_id).map(|btn| btn.event)
    }

    /// Creates a DOM element per button
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons.iter().map(button_element).collect()
    }

    /// Creates the keypad container holding every button
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div").with_id("keypad").with_class("keypad"),
            DomElement::with_child,
        )
    }
}

fn button_element(btn: &KeypadButtonDef) -> DomElement {
    let mut elem = DomElement::new("button")
        .with_id(&btn.id)
        .with_text(&btn.label)
        .with_class("btn")
        .with_attr("data-row", &btn.row.to_string())
        .with_attr("data-col", &btn.col.to_string());
    if btn.span > 1 {
        elem = elem.with_attr("data-span", &btn.span.to_string());
    }
    if matches!(btn.event, InputEvent::Operator(_)) {
        elem = elem.with_class("operator");
    }
    if btn.event.is_memory() {
        elem = elem.with_class("memory");
    }
    elem
}

/// Extension trait for adding the keypad to a [`MockDom`]
pub trait MockDomKeypadExt {
    /// Registers the keypad container and its buttons
    fn add_keypad(&mut self, keypad: &WasmKeypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &WasmKeypad) {
        self.register_element(keypad.create_keypad_element());
        for btn in keypad.create_dom_elements() {
            self.register_element(btn);
        }
    }
}
