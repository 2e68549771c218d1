// crates/impact_formatter/src/lib.rs

//! Turns collected [`Regions`] into the caller-facing outputs: the five-slot
//! region list and the `[LAB]` impact block, optionally wrapped in the
//! prefix/suffix text of the invocation.

use newline_utils::normalize_newlines;
use normalize_separators::{ensure_trailing_separator, normalize_separators};
use region_scanner::{RegionTag, Regions, REGION_COUNT};

/// First line of every impact block.
pub const IMPACT_HEADER: &str = "[LAB]";

/// Prefix and suffix text wrapped around each extract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wrapping {
    before: String,
    after: String,
}

impl Wrapping {
    /// Returns `None` unless at least one side is non-blank after trimming.
    pub fn new(before: Option<&str>, after: Option<&str>) -> Option<Self> {
        let before = before.unwrap_or("").trim();
        let after = after.unwrap_or("").trim();
        if before.is_empty() && after.is_empty() {
            return None;
        }
        Some(Self {
            before: before.to_string(),
            after: after.to_string(),
        })
    }

    /// `"{before} {content} {after}"` with empty parts left out, so no doubled
    /// or dangling spaces appear.
    pub fn wrap(&self, content: &str) -> String {
        [self.before.as_str(), content.trim(), self.after.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Flattens one region's fragments onto a single comma-normalised line.
/// `None` if nothing meaningful is left.
pub fn flatten_region(fragments: &[String]) -> Option<String> {
    let joined = fragments
        .iter()
        .map(|fragment| normalize_newlines(fragment))
        .filter_map(|fragment| {
            let trimmed = fragment.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ");
    let flat = normalize_separators(&joined);
    (!flat.is_empty()).then_some(flat)
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ImpactLine {
    tag: RegionTag,
    /// Flattened content, without the trailing separator.
    content: String,
}

/// The `[LAB]` block: a header followed by one line per non-empty region,
/// in ascending tag order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImpactBlock {
    lines: Vec<ImpactLine>,
}

impl ImpactBlock {
    pub fn from_regions(regions: &Regions) -> Self {
        let lines = regions
            .iter()
            .filter_map(|(tag, fragments)| {
                flatten_region(fragments).map(|content| ImpactLine { tag, content })
            })
            .collect();
        Self { lines }
    }

    /// Renders `[ARk]content, ` lines, or `[ARk] before content after` when
    /// wrapping. The header is never wrapped.
    pub fn render(&self, wrapping: Option<&Wrapping>) -> String {
        let mut out = Vec::with_capacity(self.lines.len() + 1);
        out.push(IMPACT_HEADER.to_string());
        for line in &self.lines {
            out.push(match wrapping {
                Some(wrapping) => format!("[{}] {}", line.tag, wrapping.wrap(&line.content)),
                None => format!("[{}]{}", line.tag, ensure_trailing_separator(&line.content)),
            });
        }
        out.join("\n")
    }
}

/// The five-slot region list: combined content per slot or `None`, each
/// present entry wrapped when a [`Wrapping`] is given.
pub fn region_list(regions: &Regions, wrapping: Option<&Wrapping>) -> [Option<String>; REGION_COUNT] {
    RegionTag::ALL.map(|tag| {
        regions.combined(tag).map(|content| match wrapping {
            Some(wrapping) => wrapping.wrap(&content),
            None => content,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(n: u8) -> RegionTag {
        RegionTag::new(n).unwrap()
    }

    fn sample_regions() -> Regions {
        let mut regions = Regions::new();
        regions.push(tag(1), "x");
        regions.push(tag(3), "red ,blue");
        regions.push(tag(3), "green,\r\n");
        regions
    }

    #[test]
    fn test_flatten_joins_and_normalises() {
        let fragments = vec!["a ,b".to_string(), "  ".to_string(), "c,".to_string()];
        assert_eq!(flatten_region(&fragments).as_deref(), Some("a, b c"));
        assert_eq!(flatten_region(&[",".to_string()]), None);
    }

    #[test]
    fn test_impact_block_skips_empty_regions() {
        let block = ImpactBlock::from_regions(&sample_regions());
        assert_eq!(block.render(None), "[LAB]\n[AR1]x, \n[AR3]red, blue green, ");
    }

    #[test]
    fn test_impact_block_without_regions_is_header_only() {
        assert_eq!(ImpactBlock::from_regions(&Regions::new()).render(None), "[LAB]");
    }

    #[test]
    fn test_wrapped_impact_block() {
        let wrapping = Wrapping::new(Some(" PRE "), Some("POST")).unwrap();
        let block = ImpactBlock::from_regions(&sample_regions());
        assert_eq!(
            block.render(Some(&wrapping)),
            "[LAB]\n[AR1] PRE x POST\n[AR3] PRE red, blue green POST"
        );
    }

    #[test]
    fn test_one_sided_wrapping_has_no_extra_spaces() {
        let wrapping = Wrapping::new(None, Some("POST")).unwrap();
        assert_eq!(wrapping.wrap("x"), "x POST");
        let wrapping = Wrapping::new(Some("PRE"), Some("   ")).unwrap();
        assert_eq!(wrapping.wrap("x"), "PRE x");
        assert_eq!(wrapping.wrap(""), "PRE");
    }

    #[test]
    fn test_blank_wrapping_is_none() {
        assert!(Wrapping::new(Some("  "), None).is_none());
        assert!(Wrapping::new(None, None).is_none());
    }

    #[test]
    fn test_region_list_keeps_five_slots() {
        let list = region_list(&sample_regions(), None);
        assert_eq!(
            list,
            [
                Some("x".to_string()),
                None,
                Some("red ,blue\ngreen,".to_string()),
                None,
                None
            ]
        );

        let wrapping = Wrapping::new(Some("PRE"), Some("POST")).unwrap();
        let wrapped = region_list(&sample_regions(), Some(&wrapping));
        assert_eq!(wrapped[0].as_deref(), Some("PRE x POST"));
        assert_eq!(wrapped[1], None);
    }
}
