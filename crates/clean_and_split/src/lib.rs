// crates/clean_and_split/src/lib.rs

use serde::Serialize;

use comment_prefix::DEFAULT_COMMENT_PREFIX;
use compose_prompt::{compose, is_blank};
use filter_comment_lines::filter_comment_lines;
use impact_formatter::{region_list, ImpactBlock, Wrapping};
use prompt_fingerprint::Fingerprint;
use region_scanner::{scan_regions, RegionTag, REGION_COUNT};
use settings_source::{resolve_comment_prefix, SettingsSource};

pub use compose_prompt::PromptInput;

pub mod config;

/// Per-call configuration of the cleaning pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanConfig {
    /// Lines starting with this (after indentation) are dropped.
    /// Empty disables comment filtering.
    pub comment_prefix: String,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_PREFIX)
    }
}

impl CleanConfig {
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Reads the comment prefix through `source`.
    pub fn from_settings(source: &dyn SettingsSource) -> Self {
        Self::new(resolve_comment_prefix(source))
    }
}

/// Result of one cleaning pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CleanedPrompt {
    /// Text with comment lines, region spans and blank lines removed.
    pub cleaned_text: String,
    /// Comment-filtered text with only the tag tokens removed.
    pub marker_free_text: String,
    /// One slot per region `AR1`..`AR5`.
    pub regions: [Option<String>; REGION_COUNT],
    /// The `[LAB]` summary block, empty for blank input.
    pub impact: String,
    pub fingerprint: String,
}

/// Runs the whole pipeline: compose, drop comment lines, scan regions, format.
///
/// Never fails. Blank input short-circuits to empty outputs and five `None`
/// regions.
pub fn clean_and_split(input: &PromptInput, config: &CleanConfig) -> CleanedPrompt {
    let mut out = split(input, config);
    out.fingerprint = fingerprint_outputs(input, config, &out);
    out
}

fn split(input: &PromptInput, config: &CleanConfig) -> CleanedPrompt {
    if is_blank(input) {
        log::debug!("blank input; nothing to clean");
        return CleanedPrompt::default();
    }

    let composed = compose(input);
    let lines = filter_comment_lines(&composed, &config.comment_prefix);
    let scan = scan_regions(&lines);

    let wrapping = Wrapping::new(input.before_text.as_deref(), input.after_text.as_deref());
    let impact = ImpactBlock::from_regions(&scan.regions).render(wrapping.as_ref());
    let regions = region_list(&scan.regions, wrapping.as_ref());

    log::debug!(
        "cleaned {} line(s); {} region slot(s) filled",
        lines.len(),
        regions.iter().filter(|slot| slot.is_some()).count()
    );

    CleanedPrompt {
        cleaned_text: scan.cleaned_text,
        marker_free_text: scan.marker_free_text,
        regions,
        impact,
        fingerprint: String::new(),
    }
}

// Hashes the inputs that steer wrapping next to every output, so two prompts
// share a fingerprint only when they clean to the same result.
fn fingerprint_outputs(input: &PromptInput, config: &CleanConfig, out: &CleanedPrompt) -> String {
    let mut fp = Fingerprint::new();
    fp.field("comment_prefix", Some(config.comment_prefix.as_str()))
        .field("before_text", side_text(&input.before_text))
        .field("after_text", side_text(&input.after_text))
        .field("cleaned_text", Some(out.cleaned_text.as_str()))
        .field("marker_free_text", Some(out.marker_free_text.as_str()));
    for (tag, slot) in RegionTag::ALL.iter().zip(&out.regions) {
        fp.field(&tag.to_string(), slot.as_deref());
    }
    fp.field("impact", Some(out.impact.as_str()));
    fp.finish()
}

fn side_text(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// Resolves the configuration through `source` on this call, then cleans.
pub fn clean_and_split_with_settings(input: &PromptInput, source: &dyn SettingsSource) -> CleanedPrompt {
    clean_and_split(input, &CleanConfig::from_settings(source))
}

/// Just the change-detection fingerprint of `input`. Runs the full pipeline,
/// since the fingerprint covers its outputs.
pub fn fingerprint_input(input: &PromptInput, config: &CleanConfig) -> String {
    clean_and_split(input, config).fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings_source::MemorySettings;

    #[test]
    fn test_blank_input_short_circuits() {
        let out = clean_and_split(
            &PromptInput::new("  \n").with_before("").with_after("   "),
            &CleanConfig::default(),
        );
        assert_eq!(out.cleaned_text, "");
        assert_eq!(out.marker_free_text, "");
        assert_eq!(out.regions, [None, None, None, None, None]);
        assert_eq!(out.impact, "");
    }

    #[test]
    fn test_no_regions_gives_header_only() {
        let out = clean_and_split(&PromptInput::new("plain, text"), &CleanConfig::default());
        assert_eq!(out.cleaned_text, "plain, text");
        assert_eq!(out.impact, "[LAB]");
    }

    #[test]
    fn test_prefix_comes_from_settings() {
        let settings = MemorySettings::new().with(comment_prefix::COMMENT_PREFIX_SETTING, "#");
        let out = clean_and_split_with_settings(&PromptInput::new("# hidden\n// shown"), &settings);
        assert_eq!(out.cleaned_text, "// shown");
    }

    #[test]
    fn test_fingerprint_matches_full_run() {
        let input = PromptInput::new("a, <AR1>x</>").with_after("b");
        let config = CleanConfig::default();
        assert_eq!(fingerprint_input(&input, &config), clean_and_split(&input, &config).fingerprint);
    }
}
