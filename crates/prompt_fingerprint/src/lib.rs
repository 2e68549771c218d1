// crates/prompt_fingerprint/src/lib.rs

//! Change-detection fingerprint for a cleaned prompt.
//!
//! Hosts that cache results compare fingerprints to decide whether a prompt
//! needs to be processed again. The fingerprint is built from labelled
//! fields, each newline- and comma-normalised before hashing, so comma and
//! whitespace noise does not change it while any edit that shows up in a
//! field does.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use newline_utils::normalize_newlines;
use normalize_separators::normalize_separators;

/// Newline- and comma-normalised form of a field value; this is what gets
/// hashed.
pub fn normalize_field(value: &str) -> String {
    normalize_separators(&normalize_newlines(value))
}

/// Accumulates labelled fields into a SHA-256 digest.
///
/// Every field is framed by its label, a presence byte and its length, so
/// moving text from one field to another always changes the result.
pub struct Fingerprint {
    hasher: Sha256,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Adds one field. `None` hashes differently from any present value,
    /// including an empty one.
    pub fn field(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        self.hasher.update(label.as_bytes());
        self.hasher.update([0u8]);
        match value {
            None => self.hasher.update([0u8]),
            Some(value) => {
                let normalized = normalize_field(value);
                self.hasher.update([1u8]);
                self.hasher.update((normalized.len() as u64).to_le_bytes());
                self.hasher.update(normalized.as_bytes());
            }
        }
        self
    }

    /// Lower-case hex digest.
    pub fn finish(self) -> String {
        hex_encode_lower(&self.hasher.finalize())
    }
}

fn hex_encode_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().saturating_mul(2));
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
