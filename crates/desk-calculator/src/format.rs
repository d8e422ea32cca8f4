//! Display formatting for the entry buffer and results

use crate::core::parse_entry;

/// Text shown in the primary display while the engine is in the error state
pub const ERROR_TEXT: &str = "Error";

/// Default thousands separator
pub const DEFAULT_SEPARATOR: char = ',';

/// Returns the string form of a result as it is written into the entry buffer.
///
/// Uses the shortest representation that round-trips (`5` rather than
/// `5.0`, never exponent notation) and normalises negative zero.
#[must_use]
pub fn number_to_entry(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Groups the integer digits of a numeric entry in thousands.
///
/// The sign and everything from the decimal point onwards are kept as typed,
/// so `"-1234567.50"` becomes `"-1,234,567.50"`. [`ERROR_TEXT`] and anything
/// that is not a number pass through unchanged.
#[must_use]
pub fn group_thousands(text: &str, separator: char) -> String {
    if text == ERROR_TEXT || parse_entry(text).is_err() {
        return text.to_string();
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = unsigned.split_at(unsigned.find('.').unwrap_or(unsigned.len()));

    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}{fraction}")
}

/// Removes thousands separators again (inverse of [`group_thousands`])
#[must_use]
pub fn strip_separator(text: &str, separator: char) -> String {
    text.chars().filter(|&c| c != separator).collect()
}
