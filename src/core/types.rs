// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// One of the five abstracted stroke-shape classes (Wubihua grouping)
/// used as the trie's branching key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrokeCategory {
    Horizontal = 1,
    Vertical = 2,
    FallingLeft = 3,
    Dot = 4,
    Turning = 5,
}

impl StrokeCategory {
    pub const ALL: [StrokeCategory; 5] = [
        StrokeCategory::Horizontal,
        StrokeCategory::Vertical,
        StrokeCategory::FallingLeft,
        StrokeCategory::Dot,
        StrokeCategory::Turning,
    ];

    /// Maps an input digit '1'..'5' to its category.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(StrokeCategory::Horizontal),
            '2' => Some(StrokeCategory::Vertical),
            '3' => Some(StrokeCategory::FallingLeft),
            '4' => Some(StrokeCategory::Dot),
            '5' => Some(StrokeCategory::Turning),
            _ => None,
        }
    }

    pub fn as_digit(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for StrokeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// The set of plausible categories for one stroke position.
/// Invariant: never empty. Size 1 means the raw code classified cleanly;
/// larger sizes preserve genuine source ambiguity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeSlot(BTreeSet<StrokeCategory>);

impl StrokeSlot {
    pub fn singleton(category: StrokeCategory) -> Self {
        StrokeSlot(BTreeSet::from([category]))
    }

    /// The fully ambiguous slot: all five categories are possible.
    pub fn any() -> Self {
        StrokeSlot(BTreeSet::from(StrokeCategory::ALL))
    }

    /// Builds a slot from an explicit set; `None` if the set is empty.
    pub fn from_set(categories: BTreeSet<StrokeCategory>) -> Option<Self> {
        if categories.is_empty() {
            None
        } else {
            Some(StrokeSlot(categories))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.0.len() > 1
    }

    pub fn contains(&self, category: StrokeCategory) -> bool {
        self.0.contains(&category)
    }

    /// Categories in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = StrokeCategory> + '_ {
        self.0.iter().copied()
    }
}

/// One concrete, fully resolved path of categories for one glyph.
pub type StrokeSequence = Vec<StrokeCategory>;

/// Renders a sequence as the digit string the user would type for it.
pub fn render_sequence(sequence: &[StrokeCategory]) -> String {
    sequence.iter().map(|c| char::from(b'0' + c.as_digit())).collect()
}

/// Display data attached to one indexed glyph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphMetadata {
    /// Digit rendering of the glyph's first (canonical) stroke expansion.
    /// Its length is the glyph's total stroke count, used for ranking.
    pub canonical: String,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub meanings: Vec<String>,
}

/// A glyph's stroke tree violated the expected leaf/group shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("expected only 'g' or 'path' elements, found '{0}'")]
    UnexpectedTag(String),
    #[error("expected exactly one top-level stroke group, found {0}")]
    MultipleTopLevelGroups(usize),
}

/// A per-glyph, non-fatal failure during index construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("giving up on {glyph}: {cause}")]
pub struct BuildError {
    pub glyph: char,
    pub cause: StructuralError,
}
