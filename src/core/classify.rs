// src/core/classify.rs
use crate::core::types::{StrokeCategory, StrokeSlot};
use std::collections::BTreeSet;

// Possible stroke types, from KanjiVG strokes.txt, grouped into 5 like
// Wubihua. The turning list covers every remaining shape glyph.
const HORIZONTAL: &str = "㇐㇀";
const VERTICAL: &str = "㇑";
const FALLING_LEFT: &str = "㇒";
const DOT: &str = "㇔㇏";
const TURNING: &str = "㇖㇚㇂㇙㇕㇗㇛㇜㇇㇄㇆㇟㇊㇉㇋㇌㇈㇅㇞";

const CHECKLISTS: [(&str, StrokeCategory); 5] = [
    (HORIZONTAL, StrokeCategory::Horizontal),
    (VERTICAL, StrokeCategory::Vertical),
    (FALLING_LEFT, StrokeCategory::FallingLeft),
    (DOT, StrokeCategory::Dot),
    (TURNING, StrokeCategory::Turning),
];

/// Classifies a raw KanjiVG stroke code into its plausible categories.
///
/// The code may hold several alternatives separated by '/' (genuine source
/// ambiguity), each optionally suffixed with a variant letter ("b", "v",
/// "a") that is stripped before comparison — only the leading shape glyph
/// counts. A missing or empty code, or any alternative that matches none
/// of the five lists, yields the full five-category slot: total ambiguity
/// rather than an error.
pub fn classify(raw: Option<&str>) -> StrokeSlot {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return StrokeSlot::any(),
    };

    let mut categories = BTreeSet::new();
    for alternative in raw.split('/') {
        let shape = match alternative.chars().next() {
            Some(c) => c,
            None => return StrokeSlot::any(),
        };
        match CHECKLISTS.iter().find(|(list, _)| list.contains(shape)) {
            Some(&(_, category)) => {
                categories.insert(category);
            }
            // Unrecognized shape: the whole code becomes a wildcard.
            None => return StrokeSlot::any(),
        }
    }

    // Non-empty by construction: every loop arm inserted or returned.
    StrokeSlot::from_set(categories).unwrap_or_else(StrokeSlot::any)
}
