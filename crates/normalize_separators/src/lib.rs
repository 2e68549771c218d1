// crates/normalize_separators/src/lib.rs

//! Canonical comma spacing for prompt fragments.
//!
//! Prompt text is usually a comma-separated list that accumulates noise while
//! it is edited (`a ,b`, `a, , b`, dangling commas). Everything here rewrites
//! that noise into the single `", "` style.

use once_cell::sync::Lazy;
use regex::Regex;

// A comma with any surrounding whitespace.
static COMMA_WITH_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

// Two or more separators in a row, i.e. empty list items.
static REPEATED_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:,\s*){2,}").unwrap());

// Separators dangling at the end.
static TRAILING_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:,\s*)+$").unwrap());

/// The canonical separator.
pub const SEPARATOR: &str = ", ";

/// Rewrites every comma to `", "`, merges runs of separators into one and
/// drops separators and whitespace from the end. Leading whitespace is kept.
pub fn collapse_separators(text: &str) -> String {
    let spaced = COMMA_WITH_SPACING.replace_all(text, SEPARATOR);
    let merged = REPEATED_SEPARATORS.replace_all(&spaced, SEPARATOR);
    let trimmed = TRAILING_SEPARATORS.replace(&merged, "");
    trimmed.trim_end().to_string()
}

/// [`collapse_separators`] followed by trimming both ends.
/// Idempotent: normalising an already normalised string changes nothing.
pub fn normalize_separators(text: &str) -> String {
    collapse_separators(text).trim().to_string()
}

/// Makes a non-empty list fragment end in `", "` so the next fragment can be
/// appended directly.
pub fn ensure_trailing_separator(text: &str) -> String {
    let mut out = text.to_string();
    if !out.ends_with(',') {
        out.push(',');
    }
    out.push(' ');
    out
}
