// crates/compose_prompt/src/lib.rs

use serde::{Deserialize, Serialize};

/// The text handed to the pipeline: a required body optionally flanked by
/// prefix and suffix text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptInput {
    pub before_text: Option<String>,
    pub text: String,
    pub after_text: Option<String>,
}

impl PromptInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before_text = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after_text = Some(after.into());
        self
    }
}

/// Joins prefix, body and suffix into one buffer.
///
/// Only the seams are trimmed: trailing whitespace of the prefix and leading
/// whitespace of the suffix. Members that end up empty are skipped, the rest
/// are separated by a single newline.
pub fn compose(input: &PromptInput) -> String {
    let before = input.before_text.as_deref().unwrap_or("").trim_end();
    let after = input.after_text.as_deref().unwrap_or("").trim_start();

    [before, input.text.as_str(), after]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `true` when composing the input would leave nothing but whitespace.
pub fn is_blank(input: &PromptInput) -> bool {
    compose(input).trim().is_empty()
}
