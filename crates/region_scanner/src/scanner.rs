// crates/region_scanner/src/scanner.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use normalize_separators::{collapse_separators, ensure_trailing_separator};

use crate::tag::{RegionTag, Regions};

/// Closes any open region.
pub const CLOSE_MARKER: &str = "</>";

// `<ARk>body</>` closed on the same line; lazy so several spans on one line
// are matched separately.
static INLINE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<AR([1-5])>(.*?)</>").unwrap());

// A trimmed line that starts with `<ARk>` and opens a multi-line region.
static REGION_OPENER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^<AR([1-5])>(.*)$").unwrap());

static OPEN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<AR[1-5]>").unwrap());

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Scanning,
    InRegion { tag: RegionTag, body: Vec<String> },
}

/// Everything one scan produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// Text outside any region; blank lines dropped, trimmed at both ends.
    pub cleaned_text: String,
    /// Every input line with only the tag tokens removed.
    pub marker_free_text: String,
    pub regions: Regions,
}

/// Incremental region scanner, fed one physical line at a time.
///
/// Per line, while scanning:
///  1. same-line spans `<ARk>…</>` win; their bodies go to the region and the
///     rest of the line is kept as a comma-normalised list fragment;
///  2. otherwise a line starting with `<ARk>` opens a multi-line region,
///     with any text after the tag as its first body line;
///  3. otherwise non-blank lines are kept as they are.
///
/// Inside a region every line is body until one containing `</>`; the text
/// before the marker ends the body and the rest of that line is dropped (it
/// only shows up in the marker-free text).
#[derive(Debug, Default)]
pub struct TagScanner {
    state: ScanState,
    regions: Regions,
    residual: Vec<String>,
    marker_free: Vec<String>,
}

impl TagScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a multi-line region is currently open.
    pub fn in_region(&self) -> bool {
        matches!(self.state, ScanState::InRegion { .. })
    }

    pub fn feed_line(&mut self, line: &str) {
        let view = match std::mem::take(&mut self.state) {
            ScanState::Scanning => self.scan_line(line),
            ScanState::InRegion { tag, mut body } => match line.find(CLOSE_MARKER) {
                Some(idx) => {
                    let head = &line[..idx];
                    let tail = &line[idx + CLOSE_MARKER.len()..];
                    let last = head.trim();
                    if !last.is_empty() {
                        body.push(last.to_string());
                    }
                    self.close_region(tag, body);
                    if !tail.trim().is_empty() {
                        log::debug!("{} closed; dropping {:?} after the closer", tag, tail.trim());
                    }
                    format!("{head}{tail}")
                }
                None => {
                    body.push(line.to_string());
                    self.state = ScanState::InRegion { tag, body };
                    line.to_string()
                }
            },
        };
        self.marker_free.push(view);
    }

    /// Ends the scan. A region still open at this point keeps whatever body
    /// it collected.
    pub fn finish(mut self) -> ScanOutput {
        if let ScanState::InRegion { tag, body } = std::mem::take(&mut self.state) {
            log::debug!(
                "{} region not closed before end of input; keeping {} body line(s)",
                tag,
                body.len()
            );
            self.close_region(tag, body);
        }

        let cleaned_text = self
            .residual
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        ScanOutput {
            cleaned_text,
            marker_free_text: self.marker_free.join("\n"),
            regions: self.regions,
        }
    }

    // Handles a line in the scanning state and returns its marker-free
    // rendering.
    fn scan_line(&mut self, line: &str) -> String {
        if INLINE_SPAN.is_match(line) {
            return self.take_inline_spans(line);
        }

        if let Some(caps) = REGION_OPENER.captures(line.trim()) {
            if let Some(tag) = RegionTag::from_numeral(&caps[1]) {
                let first = caps[2].trim();
                let body = if first.is_empty() {
                    Vec::new()
                } else {
                    vec![first.to_string()]
                };
                self.state = ScanState::InRegion { tag, body };
                return OPEN_TOKEN.replace(line, "").into_owned();
            }
        }

        let kept = line.trim_end();
        if !kept.trim_start().is_empty() {
            self.residual.push(kept.to_string());
        }
        line.to_string()
    }

    fn take_inline_spans(&mut self, line: &str) -> String {
        for caps in INLINE_SPAN.captures_iter(line) {
            let Some(tag) = RegionTag::from_numeral(&caps[1]) else {
                continue;
            };
            let content = caps[2].trim();
            if content.is_empty() {
                log::debug!("{} span with empty body ignored", tag);
            } else {
                self.regions.push(tag, content);
            }
        }

        let remainder = collapse_separators(&INLINE_SPAN.replace_all(line, ""));
        if !remainder.is_empty() {
            self.residual.push(ensure_trailing_separator(&remainder));
        }

        INLINE_SPAN
            .replace_all(line, |caps: &Captures| caps[2].to_string())
            .into_owned()
    }

    fn close_region(&mut self, tag: RegionTag, body: Vec<String>) {
        let joined = body.join("\n");
        let content = joined.trim_end();
        if content.is_empty() {
            log::debug!("{} region closed with an empty body", tag);
        } else {
            self.regions.push(tag, content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_regions;

    fn tag(n: u8) -> RegionTag {
        RegionTag::new(n).unwrap()
    }

    #[test]
    fn test_inline_span_between_list_items() {
        let out = scan_regions(["a, <AR1>x</>, b"]);
        assert_eq!(out.regions.fragments(tag(1)), ["x"]);
        assert_eq!(out.cleaned_text, "a, b,");
        assert_eq!(out.marker_free_text, "a, x, b");
    }

    #[test]
    fn test_several_inline_spans_on_one_line() {
        let out = scan_regions(["<AR1> one </>, mid, <ar2>two</>, <AR1>three</>"]);
        assert_eq!(out.regions.fragments(tag(1)), ["one", "three"]);
        assert_eq!(out.regions.fragments(tag(2)), ["two"]);
        // Only trailing separators are dropped; the leading one stays.
        assert_eq!(out.cleaned_text, ", mid,");
    }

    #[test]
    fn test_inline_only_line_leaves_no_residual() {
        let out = scan_regions(["<AR3>only</>", "rest"]);
        assert_eq!(out.cleaned_text, "rest");
        assert_eq!(out.regions.combined(tag(3)).as_deref(), Some("only"));
    }

    #[test]
    fn test_multi_line_region() {
        let out = scan_regions(["<AR2>", "line one", "line two", "</>"]);
        assert_eq!(out.regions.fragments(tag(2)), ["line one\nline two"]);
        assert_eq!(out.cleaned_text, "");
        assert_eq!(out.marker_free_text, "\nline one\nline two\n");
    }

    #[test]
    fn test_multi_line_region_keeps_opener_tail_and_closer_head() {
        let out = scan_regions(["before", "  <AR4> first", "  middle  ", "last </>", "after"]);
        assert_eq!(out.regions.fragments(tag(4)), ["first\n  middle  \nlast"]);
        assert_eq!(out.cleaned_text, "before\nafter");
    }

    #[test]
    fn test_text_after_closer_is_dropped() {
        let out = scan_regions(["<AR1>", "body", "</> tail, <AR2>y</>", "next"]);
        assert_eq!(out.regions.fragments(tag(1)), ["body"]);
        assert!(out.regions.fragments(tag(2)).is_empty());
        assert_eq!(out.cleaned_text, "next");
        assert_eq!(out.marker_free_text, "\nbody\n tail, <AR2>y</>\nnext");
    }

    #[test]
    fn test_lowercase_tag_opens_multi_line_region() {
        let out = scan_regions(["intro", "<ar2>", "low", "</>"]);
        assert_eq!(out.regions.fragments(tag(2)), ["low"]);
        assert_eq!(out.cleaned_text, "intro");
        assert_eq!(out.marker_free_text, "intro\n\nlow\n");
    }

    #[test]
    fn test_inline_span_wins_over_opener() {
        let mut scanner = TagScanner::new();
        scanner.feed_line("<AR1>x</> <AR2>dangling");
        assert!(!scanner.in_region());
        let out = scanner.finish();
        assert_eq!(out.regions.fragments(tag(1)), ["x"]);
        assert!(out.regions.fragments(tag(2)).is_empty());
        assert_eq!(out.cleaned_text, "<AR2>dangling,");
    }

    #[test]
    fn test_unterminated_region_takes_rest_of_input() {
        let out = scan_regions(["keep", "<AR5>", "a", "b  "]);
        assert_eq!(out.regions.fragments(tag(5)), ["a\nb"]);
        assert_eq!(out.cleaned_text, "keep");
    }

    #[test]
    fn test_empty_bodies_record_nothing() {
        let out = scan_regions(["<AR1>   </>", "<AR2>", "   ", "</>"]);
        assert!(out.regions.is_empty());
        assert_eq!(out.cleaned_text, "");
    }

    #[test]
    fn test_unknown_numerals_stay_literal() {
        let out = scan_regions(["<AR9>text</>", "<AR0>", "x"]);
        assert!(out.regions.is_empty());
        assert_eq!(out.cleaned_text, "<AR9>text</>\n<AR0>\nx");
        assert_eq!(out.marker_free_text, "<AR9>text</>\n<AR0>\nx");
    }

    #[test]
    fn test_stray_closer_outside_region_is_literal() {
        let out = scan_regions(["a </> b"]);
        assert_eq!(out.cleaned_text, "a </> b");
    }

    #[test]
    fn test_opener_must_start_the_line() {
        let out = scan_regions(["text <AR1> more", "next"]);
        assert!(out.regions.is_empty());
        assert_eq!(out.cleaned_text, "text <AR1> more\nnext");
    }

    #[test]
    fn test_blank_line_after_inline_span() {
        // The blank line survives in the marker-free view only.
        let out = scan_regions(["<AR1>x</>", "", "b"]);
        assert_eq!(out.cleaned_text, "b");
        assert_eq!(out.marker_free_text, "x\n\nb");
    }

    #[test]
    fn test_blank_lines_dropped_from_cleaned_text() {
        let out = scan_regions(["a", "", "   ", "b   "]);
        assert_eq!(out.cleaned_text, "a\nb");
        assert_eq!(out.marker_free_text, "a\n\n   \nb   ");
    }

    #[test]
    fn test_comment_lines_inside_region_are_already_gone() {
        let lines = filter_comment_lines::filter_comment_lines(
            "<AR2>\nkept\n// hidden </>\nalso kept\n</>",
            "//",
        );
        let out = scan_regions(lines);
        assert_eq!(out.regions.fragments(tag(2)), ["kept\nalso kept"]);
    }
}
