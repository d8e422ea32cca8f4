//! Input events accepted by the engine

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// One discrete keypad or keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Digit key (0-9); other values are ignored
    Digit(u8),
    /// Decimal point key
    DecimalPoint,
    /// One of `+ - * /`
    Operator(Operation),
    /// `=` / Enter
    Evaluate,
    /// `%`
    Percent,
    /// `±`
    ToggleSign,
    /// `C`: clears entry and pending expression
    ClearAll,
    /// `CE`: clears the entry only
    ClearEntry,
    /// Removes the last typed character
    Backspace,
    /// `MS`
    MemoryStore,
    /// `MR`
    MemoryRecall,
    /// `M+`
    MemoryAdd,
    /// `M-`
    MemorySubtract,
    /// `MC`
    MemoryClear,
}

impl InputEvent {
    /// Maps a DOM `KeyboardEvent.key` value to an event.
    ///
    /// No standard layout has a `±` key, so sign toggle is also bound to `_`
    /// (shift + minus) and `F9`, the usual desktop-calculator shortcut.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let event = match key {
            "." => Self::DecimalPoint,
            "Enter" | "=" => Self::Evaluate,
            "Escape" => Self::ClearAll,
            "Delete" => Self::ClearEntry,
            "Backspace" => Self::Backspace,
            "%" => Self::Percent,
            "_" | "±" | "F9" => Self::ToggleSign,
            _ => {
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if let Some(d) = ch.to_digit(10) {
                    Self::Digit(d as u8)
                } else {
                    Self::Operator(Operation::from_symbol(ch)?)
                }
            }
        };
        Some(event)
    }

    /// Returns true for events that only touch the memory slot
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(
            self,
            Self::MemoryStore
                | Self::MemoryRecall
                | Self::MemoryAdd
                | Self::MemorySubtract
                | Self::MemoryClear
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_digits() {
        for d in 0..=9u8 {
            assert_eq!(
                InputEvent::from_key(&d.to_string()),
                Some(InputEvent::Digit(d))
            );
        }
    }

    #[test]
    fn test_from_key_operators() {
        assert_eq!(
            InputEvent::from_key("+"),
            Some(InputEvent::Operator(Operation::Add))
        );
        assert_eq!(
            InputEvent::from_key("-"),
            Some(InputEvent::Operator(Operation::Subtract))
        );
        assert_eq!(
            InputEvent::from_key("*"),
            Some(InputEvent::Operator(Operation::Multiply))
        );
        assert_eq!(
            InputEvent::from_key("/"),
            Some(InputEvent::Operator(Operation::Divide))
        );
    }

    #[test]
    fn test_from_key_commands() {
        assert_eq!(InputEvent::from_key("."), Some(InputEvent::DecimalPoint));
        assert_eq!(InputEvent::from_key("Enter"), Some(InputEvent::Evaluate));
        assert_eq!(InputEvent::from_key("="), Some(InputEvent::Evaluate));
        assert_eq!(InputEvent::from_key("Escape"), Some(InputEvent::ClearAll));
        assert_eq!(InputEvent::from_key("Delete"), Some(InputEvent::ClearEntry));
        assert_eq!(InputEvent::from_key("Backspace"), Some(InputEvent::Backspace));
        assert_eq!(InputEvent::from_key("%"), Some(InputEvent::Percent));
    }

    #[test]
    fn test_from_key_sign_toggle_bindings() {
        for key in ["_", "±", "F9"] {
            assert_eq!(InputEvent::from_key(key), Some(InputEvent::ToggleSign));
        }
    }

    #[test]
    fn test_from_key_unbound() {
        for key in ["", "a", "^", "(", "Shift", "12", "F1"] {
            assert_eq!(InputEvent::from_key(key), None, "key {key:?}");
        }
    }

    #[test]
    fn test_is_memory() {
        assert!(InputEvent::MemoryAdd.is_memory());
        assert!(InputEvent::MemoryClear.is_memory());
        assert!(!InputEvent::ClearAll.is_memory());
        assert!(!InputEvent::Digit(1).is_memory());
    }
}
