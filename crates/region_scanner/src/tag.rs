// crates/region_scanner/src/tag.rs

use std::fmt;

/// Number of region slots.
pub const REGION_COUNT: usize = 5;

/// One of the region identifiers `AR1` … `AR5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionTag(u8);

impl RegionTag {
    pub const ALL: [RegionTag; REGION_COUNT] = [
        RegionTag(1),
        RegionTag(2),
        RegionTag(3),
        RegionTag(4),
        RegionTag(5),
    ];

    /// `None` for anything outside `1..=5`.
    pub fn new(number: u8) -> Option<Self> {
        (1..=REGION_COUNT as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Parses the numeral that follows `AR` in a tag.
    pub fn from_numeral(numeral: &str) -> Option<Self> {
        numeral.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot index.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AR{}", self.number())
    }
}

/// Fragments collected per region, in order of appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Regions {
    slots: [Vec<String>; REGION_COUNT],
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: RegionTag, fragment: impl Into<String>) {
        self.slots[tag.index()].push(fragment.into());
    }

    pub fn fragments(&self, tag: RegionTag) -> &[String] {
        &self.slots[tag.index()]
    }

    /// All fragments of `tag` joined by newlines and trimmed, or `None` when
    /// nothing was recorded.
    pub fn combined(&self, tag: RegionTag) -> Option<String> {
        let joined = self.fragments(tag).join("\n");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionTag, &[String])> + '_ {
        RegionTag::ALL
            .into_iter()
            .map(move |tag| (tag, self.fragments(tag)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }
}
