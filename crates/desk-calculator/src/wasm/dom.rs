//! Mock DOM
//!
//! A small element tree standing in for the browser page so the rendering
//! path can be tested natively. The calculator page has three live regions:
//! `result` (primary display), `calculation` (pending expression) and
//! `history-container` (one `div.history-item` per history line).

use std::collections::HashMap;

/// Id of the primary display
pub const RESULT_ID: &str = "result";
/// Id of the pending-expression display
pub const CALCULATION_ID: &str = "calculation";
/// Id of the history list
pub const HISTORY_ID: &str = "history-container";
/// Class of each history line
pub const HISTORY_ITEM_CLASS: &str = "history-item";
/// Class set on the primary display while it shows `Error`
pub const ERROR_CLASS: &str = "error";

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element id (may be empty)
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates an element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Replaces the text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content.clear();
        self.text_content.push_str(text);
    }

    /// Adds a class if not already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds or removes a class
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks for a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Events the page can dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Button click
    Click {
        /// Id of the clicked element
        element_id: String,
    },
    /// Document `keydown`
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Element registry plus a record of dispatched events
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();
        dom.register_element(
            DomElement::new("div")
                .with_id(RESULT_ID)
                .with_class("result")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(CALCULATION_ID)
                .with_class("calculation"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(HISTORY_ID)
                .with_class("history"),
        );
        dom
    }

    /// Registers an element for id lookup; elements without an id are ignored
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by id
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by id
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records a dispatched event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Events dispatched so far
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Forgets dispatched events
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Sets an element's text
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets an element's text
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Appends a child; children with an id are also registered
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        self.register_element(child);
    }

    /// Removes all children of an element
    pub fn clear_children(&mut self, id: &str) {
        let child_ids: Vec<String> = self
            .elements
            .get(id)
            .map(|elem| {
                elem.children
                    .iter()
                    .filter(|c| !c.id.is_empty())
                    .map(|c| c.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        for child_id in child_ids {
            self.elements.remove(&child_id);
        }
        if let Some(elem) = self.elements.get_mut(id) {
            elem.children.clear();
        }
    }

    /// Text of every child of an element, in document order
    #[must_use]
    pub fn child_texts(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|elem| {
                elem.children
                    .iter()
                    .map(|c| c.text_content.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
