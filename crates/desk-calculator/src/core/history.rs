//! Bounded history of completed calculations

use crate::format::number_to_entry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated, as built from the keypad (`12+3*4`)
    pub expression: String,
    /// The rounded result
    pub result: f64,
    /// When the calculation completed (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a new history entry stamped with the current time
    #[must_use]
    pub fn new(expression: String, result: f64) -> Self {
        Self {
            expression,
            result,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Creates a history entry with a specific timestamp
    #[must_use]
    pub fn with_timestamp(expression: String, result: f64, timestamp: u64) -> Self {
        Self {
            expression,
            result,
            timestamp,
        }
    }

    fn current_timestamp() -> u64 {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        }
        // SystemTime panics on wasm32-unknown-unknown
        #[cfg(target_arch = "wasm32")]
        {
            0
        }
    }

    /// Returns the `"expression = result"` line shown in the history panel
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, number_to_entry(self.result))
    }
}

/// Calculation history with FIFO eviction
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest at the front, newest at the back
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 5;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history keeping at most `max_entries` entries
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Adds a calculation result to the history
    pub fn record(&mut self, expression: &str, result: f64) {
        self.push(HistoryEntry::new(expression.to_string(), result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the display lines, newest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.iter_rev().map(HistoryEntry::display).collect()
    }

    /// Serializes the history to JSON (newest first)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.iter_rev().collect::<Vec<_>>())
    }
}
