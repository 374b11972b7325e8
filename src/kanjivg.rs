// File: src/kanjivg.rs
//! Stroke-source parser: KanjiVG XML in, glyph records out.
//!
//! Each `<kanji>` entry is expected to hold exactly one top-level `<g>`
//! whose `kvg:element` attribute names the character; the subtree of
//! `<g>`/`<path>` elements becomes the glyph's stroke tree. Entries
//! without an element attribute are not indexable and are skipped;
//! structural violations travel inside the record so the build can skip
//! and log them per glyph.

use crate::core::decompose::GlyphNode;
use crate::core::engine::GlyphRecord;
use crate::core::types::StructuralError;

pub const KANJIVG_NS: &str = "http://kanjivg.tagaini.net";

/// Parses a whole KanjiVG document into glyph records.
pub fn parse_document(xml: &str) -> Result<Vec<GlyphRecord>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut records = Vec::new();

    for entry in doc.root_element().children().filter(|n| n.is_element()) {
        let groups: Vec<_> = entry.children().filter(|n| n.is_element()).collect();
        let Some(&top) = groups.first() else { continue };
        let Some(element) = top.attribute((KANJIVG_NS, "element")) else { continue };
        let Some(glyph) = element.chars().next() else { continue };

        let tree = if groups.len() == 1 {
            convert(top)
        } else {
            Err(StructuralError::MultipleTopLevelGroups(groups.len()))
        };
        records.push(GlyphRecord { glyph, tree });
    }
    Ok(records)
}

fn convert(node: roxmltree::Node) -> Result<GlyphNode, StructuralError> {
    match node.tag_name().name() {
        "path" => Ok(GlyphNode::Stroke {
            kind: node.attribute((KANJIVG_NS, "type")).map(str::to_string),
        }),
        "g" => {
            let children = node
                .children()
                .filter(|n| n.is_element())
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(GlyphNode::Group { children })
        }
        other => Err(StructuralError::UnexpectedTag(other.to_string())),
    }
}
