// crates/region_scanner/src/lib.rs

//! Line-oriented scanner for `<ARk>…</>` annotation regions (k = 1..5).
//!
//! One pass over the (comment-filtered) lines yields three views:
//!
//!  * the *cleaned* text, with every region span removed and blank lines dropped,
//!  * the *marker-free* text, with only the tag tokens removed,
//!  * the collected [`Regions`].
//!
//! Malformed markup never fails: unknown numerals stay literal text, an
//! unterminated region swallows the rest of the input, and empty bodies
//! record nothing.

pub mod scanner;
pub mod tag;

pub use scanner::{ScanOutput, TagScanner, CLOSE_MARKER};
pub use tag::{RegionTag, Regions, REGION_COUNT};

/// Runs a fresh [`TagScanner`] over `lines`.
pub fn scan_regions<I, S>(lines: I) -> ScanOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = TagScanner::new();
    for line in lines {
        scanner.feed_line(line.as_ref());
    }
    scanner.finish()
}
