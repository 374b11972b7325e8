// src/core/decompose.rs
use crate::core::classify::classify;
use crate::core::types::{StrokeSequence, StrokeSlot};

/// One node of a glyph's hierarchical stroke description.
///
/// KanjiVG draws a glyph as nested stroke groups whose leaves are the
/// individual strokes. Anything that is not one of these two shapes is a
/// structural error caught where the XML is converted (see `kanjivg`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphNode {
    /// A single stroke with its raw shape code, if the source carried one.
    Stroke { kind: Option<String> },
    /// An ordered grouping of sub-strokes and sub-groups.
    Group { children: Vec<GlyphNode> },
}

/// Walks a glyph tree and produces its stroke slots in drawing order.
///
/// A stroke leaf classifies to one slot. A group concatenates its
/// children's slots in document order; a childless group stands in for
/// one unknown stroke (full ambiguity) so the glyph still gets indexed.
pub fn decompose(node: &GlyphNode) -> Vec<StrokeSlot> {
    match node {
        GlyphNode::Stroke { kind } => vec![classify(kind.as_deref())],
        GlyphNode::Group { children } if children.is_empty() => vec![StrokeSlot::any()],
        GlyphNode::Group { children } => children.iter().flat_map(decompose).collect(),
    }
}

/// Expands per-slot category sets into every concrete stroke sequence.
///
/// Sparse form `[{1}, {2,3}, {4,5}]` becomes
/// `[[1,2,4], [1,3,4], [1,2,5], [1,3,5]]`: each multi-valued slot
/// replicates the sequences built so far, one block per category in
/// ascending value order, so the result count is the product of the slot
/// cardinalities and every sequence covers every slot.
pub fn expand(slots: &[StrokeSlot]) -> Vec<StrokeSequence> {
    let mut space: Vec<StrokeSequence> = vec![Vec::new()];
    for slot in slots {
        if slot.is_ambiguous() {
            let base = std::mem::take(&mut space);
            for category in slot.iter() {
                for sequence in &base {
                    let mut extended = sequence.clone();
                    extended.push(category);
                    space.push(extended);
                }
            }
        } else if let Some(category) = slot.iter().next() {
            for sequence in &mut space {
                sequence.push(category);
            }
        }
    }
    space
}
