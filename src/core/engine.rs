// src/core/engine.rs
use crate::core::decompose::{decompose, expand, GlyphNode};
use crate::core::trie::{StrokeTrie, TrieNode};
use crate::core::types::{
    render_sequence, BuildError, GlyphMetadata, StrokeCategory, StructuralError,
};
use std::collections::{HashMap, VecDeque};
use tracing::warn;

/// One glyph as delivered by the stroke-source parser: the character plus
/// its stroke tree, or the structural violation that kept the tree from
/// being built. Records lacking an element attribute never get this far.
#[derive(Debug, Clone)]
pub struct GlyphRecord {
    pub glyph: char,
    pub tree: Result<GlyphNode, StructuralError>,
}

/// The built lookup index: the stroke trie plus per-glyph display data.
#[derive(Debug, Clone, Default)]
pub struct LookupEngine {
    trie: StrokeTrie,
    metadata: HashMap<char, GlyphMetadata>,
}

impl LookupEngine {
    /// Builds the index from parsed glyph records. Structurally broken
    /// glyphs are logged and skipped; they never abort the build.
    pub fn build_index(records: impl IntoIterator<Item = GlyphRecord>) -> (Self, Vec<BuildError>) {
        let mut engine = LookupEngine::default();
        let mut errors = Vec::new();

        for record in records {
            let tree = match record.tree {
                Ok(tree) => tree,
                Err(cause) => {
                    let error = BuildError { glyph: record.glyph, cause };
                    warn!(glyph = %error.glyph, cause = %error.cause, "skipping glyph");
                    errors.push(error);
                    continue;
                }
            };

            let slots = decompose(&tree);
            let sequences = expand(&slots);
            if let Some(first) = sequences.first() {
                // First record for a glyph fixes its canonical sequence.
                engine
                    .metadata
                    .entry(record.glyph)
                    .or_insert_with(|| GlyphMetadata {
                        canonical: render_sequence(first),
                        ..GlyphMetadata::default()
                    });
            }
            for sequence in &sequences {
                engine.trie.insert(sequence, record.glyph);
            }
        }

        (engine, errors)
    }

    /// Restores an engine from a cached trie. Canonical sequences are
    /// recovered by a breadth-first walk: the first node where a glyph
    /// appears is its shortest (and lexicographically smallest) path.
    pub fn from_trie(trie: StrokeTrie) -> Self {
        let mut metadata: HashMap<char, GlyphMetadata> = HashMap::new();
        let mut queue: VecDeque<(Vec<StrokeCategory>, &TrieNode)> =
            VecDeque::from([(Vec::new(), trie.root())]);

        while let Some((path, node)) = queue.pop_front() {
            for &glyph in node.glyphs() {
                metadata.entry(glyph).or_insert_with(|| GlyphMetadata {
                    canonical: render_sequence(&path),
                    ..GlyphMetadata::default()
                });
            }
            for (category, child) in node.children() {
                let mut next = path.clone();
                next.push(category);
                queue.push_back((next, child));
            }
        }

        LookupEngine { trie, metadata }
    }

    /// Merges reading/meaning entries into the display data of indexed
    /// glyphs. Entries for glyphs not in the index are dropped.
    pub fn attach_readings(&mut self, readings: HashMap<char, GlyphMetadata>) {
        for (glyph, entry) in readings {
            if let Some(meta) = self.metadata.get_mut(&glyph) {
                meta.on_readings = entry.on_readings;
                meta.kun_readings = entry.kun_readings;
                meta.meanings = entry.meanings;
            }
        }
    }

    pub fn trie(&self) -> &StrokeTrie {
        &self.trie
    }

    pub fn metadata(&self, glyph: char) -> Option<&GlyphMetadata> {
        self.metadata.get(&glyph)
    }

    /// Total stroke count of a glyph, from its canonical sequence.
    pub fn stroke_count(&self, glyph: char) -> usize {
        self.metadata.get(&glyph).map_or(0, |meta| meta.canonical.len())
    }

    pub fn glyph_count(&self) -> usize {
        self.metadata.len()
    }
}
