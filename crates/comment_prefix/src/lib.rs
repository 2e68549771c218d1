// crates/comment_prefix/src/lib.rs

//! Comment‑prefix constants shared by the cleaning pipeline and the
//! line‑comment toggle.

/// Marker used when no usable value is configured.
pub const DEFAULT_COMMENT_PREFIX: &str = "//";

/// Settings key holding the line‑comment prefix.
pub const COMMENT_PREFIX_SETTING: &str = "keybinding_extra.comment_prefix";

/// Settings key holding the on/off switch for the comment toggle.
pub const TOGGLE_ENABLED_SETTING: &str = "keybinding_extra.enabled";

/// Editor‑side sanitising: trims the value and falls back to
/// [`DEFAULT_COMMENT_PREFIX`] when nothing is left.
///
/// The cleaning pipeline does *not* use this; there a whitespace‑only value
/// deliberately disables comment filtering (see `settings_source`).
pub fn sanitize_prefix(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_COMMENT_PREFIX.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_custom_prefix() {
        assert_eq!(sanitize_prefix(Some("  # ")), "#");
    }

    #[test]
    fn test_sanitize_falls_back_for_blank_or_missing() {
        assert_eq!(sanitize_prefix(None), "//");
        assert_eq!(sanitize_prefix(Some("")), "//");
        assert_eq!(sanitize_prefix(Some("   ")), "//");
    }
}
