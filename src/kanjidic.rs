// File: src/kanjidic.rs
//! Reading-source parser: kanjidic2-style XML in, display metadata out.
//!
//! Only the fields the lookup UI shows are extracted: on/kun readings
//! and default-language meanings per `<character>` literal. A glyph
//! absent from the document simply shows no readings; this file is never
//! required for the index to build.

use crate::core::types::GlyphMetadata;
use std::collections::HashMap;

/// Parses a kanjidic2-style document into per-glyph display metadata.
/// The `canonical` field is left empty; the engine owns it.
pub fn parse_document(xml: &str) -> Result<HashMap<char, GlyphMetadata>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut entries = HashMap::new();

    for character in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("character"))
    {
        let Some(literal) = character
            .children()
            .find(|n| n.has_tag_name("literal"))
            .and_then(|n| n.text())
            .and_then(|t| t.chars().next())
        else {
            continue;
        };

        let mut meta = GlyphMetadata::default();
        for node in character.descendants().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "reading" => match (node.attribute("r_type"), node.text()) {
                    (Some("ja_on"), Some(text)) => meta.on_readings.push(text.to_string()),
                    (Some("ja_kun"), Some(text)) => meta.kun_readings.push(text.to_string()),
                    _ => {}
                },
                // Meanings with an m_lang attribute are translations;
                // only the default-language glosses are shown.
                "meaning" if node.attribute("m_lang").is_none() => {
                    if let Some(text) = node.text() {
                        meta.meanings.push(text.to_string());
                    }
                }
                _ => {}
            }
        }
        entries.insert(literal, meta);
    }
    Ok(entries)
}
