// File: src/persistence.rs
use crate::core::trie::{StrokeTrie, TrieNode};
use crate::core::types::StrokeCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Why a cache could not be used. Policy on any of these is the same:
/// delete the file and rebuild from the original sources.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("cache corrupt: '{0}' is not a stroke category")]
    BadCategoryKey(String),
}

/// The on-disk shape of one trie node. Children are keyed by the
/// category digit as a string ("1".."5") so the JSON stays stable and
/// human-inspectable regardless of how categories are represented in
/// memory.
#[derive(Serialize, Deserialize)]
struct CacheNode {
    glyphs: Vec<char>,
    children: BTreeMap<String, CacheNode>,
}

fn to_cache(node: &TrieNode) -> CacheNode {
    CacheNode {
        glyphs: node.glyphs().to_vec(),
        children: node
            .children()
            .map(|(category, child)| (category.to_string(), to_cache(child)))
            .collect(),
    }
}

fn from_cache(node: CacheNode) -> Result<TrieNode, CacheError> {
    let mut restored = TrieNode::default();
    for glyph in node.glyphs {
        restored.push_glyph(glyph);
    }
    for (key, child) in node.children {
        let category = key
            .chars()
            .next()
            .filter(|_| key.len() == 1)
            .and_then(StrokeCategory::from_digit)
            .ok_or_else(|| CacheError::BadCategoryKey(key.clone()))?;
        restored.attach_child(category, from_cache(child)?);
    }
    Ok(restored)
}

/// Writes the trie cache atomically: serialize to a temp file in the
/// target directory, then persist over the final path.
pub fn save_cache(trie: &StrokeTrie, path: &Path) -> Result<(), CacheError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer(writer, &to_cache(trie.root()))?;
    temp_file
        .persist(path)
        .map_err(|e| CacheError::Io(e.error))?;
    Ok(())
}

/// Reads a previously written cache back into a trie. Any failure is a
/// `CacheError`; the caller deletes and rebuilds rather than serving
/// partial data.
pub fn load_cache(path: &Path) -> Result<StrokeTrie, CacheError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let root: CacheNode = serde_json::from_reader(reader)?;
    Ok(StrokeTrie::from_root(from_cache(root)?))
}

/// Drops a cache that failed to load so the next run starts clean.
pub fn discard_cache(path: &Path) {
    let _ = fs::remove_file(path);
}
