// --- File: src/core/trie.rs
use crate::core::types::StrokeCategory;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// One node of the stroke index.
///
/// `glyphs` holds the characters whose stroke sequence terminates exactly
/// here, in first-seen order with no duplicates. `children` branches on
/// the next stroke category (at most five entries); `BTreeMap` keeps the
/// iteration order at 1..5 so lookahead and serialization stay
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    glyphs: Vec<char>,
    children: BTreeMap<StrokeCategory, TrieNode>,
}

impl TrieNode {
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn children(&self) -> impl Iterator<Item = (StrokeCategory, &TrieNode)> {
        self.children.iter().map(|(&category, child)| (category, child))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    // Node surgery for the cache adapter; duplicate glyphs stay forbidden.
    pub(crate) fn push_glyph(&mut self, glyph: char) {
        if !self.glyphs.contains(&glyph) {
            self.glyphs.push(glyph);
        }
    }

    pub(crate) fn attach_child(&mut self, category: StrokeCategory, child: TrieNode) {
        self.children.insert(category, child);
    }
}

/// The stroke index: an n-ary trie keyed by stroke category at each
/// depth. Built once at startup (or restored from cache), then used as a
/// pure read structure; every traversal cursor lives in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeTrie {
    root: TrieNode,
}

impl StrokeTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.glyphs.is_empty() && self.root.children.is_empty()
    }

    /// Rebuilds a trie from an already-walked node tree (cache restore).
    pub fn from_root(root: TrieNode) -> Self {
        Self { root }
    }

    /// Walks/creates nodes along `sequence` and records `glyph` at the
    /// terminal node. Idempotent: a glyph already present at that node
    /// (e.g. two ambiguous expansions collapsing to one sequence) is not
    /// appended again, and first-seen order is preserved.
    pub fn insert(&mut self, sequence: &[StrokeCategory], glyph: char) {
        let mut node = &mut self.root;
        for &category in sequence {
            node = node.children.entry(category).or_default();
        }
        if !node.glyphs.contains(&glyph) {
            node.glyphs.push(glyph);
        }
    }

    /// Single-step child lookup. `None` is the normal "no match" outcome,
    /// not a failure.
    pub fn descend<'t>(&self, node: &'t TrieNode, category: StrokeCategory) -> Option<&'t TrieNode> {
        node.children.get(&category)
    }

    /// The glyphs stored exactly at `node`.
    pub fn collect_at<'t>(&self, node: &'t TrieNode) -> &'t [char] {
        &node.glyphs
    }

    /// Breadth-first enumeration of glyphs reachable below `node`,
    /// excluding `node`'s own glyphs. Levels are visited in order and
    /// siblings in category order 1..5; collection stops once at least
    /// `limit` distinct glyphs are found or the subtree is exhausted.
    /// Callers rank and truncate the result.
    pub fn nearby(&self, node: &TrieNode, limit: usize) -> Vec<char> {
        let mut found: Vec<char> = Vec::new();
        let mut seen: HashSet<char> = HashSet::new();
        let mut queue: VecDeque<&TrieNode> = node.children.values().collect();

        while let Some(probe) = queue.pop_front() {
            if found.len() >= limit {
                break;
            }
            for &glyph in &probe.glyphs {
                if seen.insert(glyph) {
                    found.push(glyph);
                }
            }
            queue.extend(probe.children.values());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StrokeCategory::*;

    #[test]
    fn insert_then_descend_round_trip() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[FallingLeft, Horizontal, Vertical], '私');

        let mut node = trie.root();
        for category in [FallingLeft, Horizontal, Vertical] {
            node = trie.descend(node, category).expect("path should exist");
        }
        assert_eq!(trie.collect_at(node), &['私']);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Horizontal], '一');
        trie.insert(&[Horizontal], '一');

        let node = trie.descend(trie.root(), Horizontal).unwrap();
        assert_eq!(trie.collect_at(node), &['一']);
    }

    #[test]
    fn glyph_order_is_first_seen() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Dot], 'b');
        trie.insert(&[Dot], 'a');
        trie.insert(&[Dot], 'b');

        let node = trie.descend(trie.root(), Dot).unwrap();
        assert_eq!(trie.collect_at(node), &['b', 'a']);
    }

    #[test]
    fn descend_missing_branch_is_none() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Horizontal], '一');
        assert!(trie.descend(trie.root(), Turning).is_none());
    }

    #[test]
    fn nearby_excludes_own_glyphs_and_dedups() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Horizontal], '一');
        trie.insert(&[Horizontal, Vertical], '十');
        // Same glyph reachable along two branches below the prefix.
        trie.insert(&[Horizontal, Vertical, Horizontal], '土');
        trie.insert(&[Horizontal, Turning, Horizontal], '土');

        let node = trie.descend(trie.root(), Horizontal).unwrap();
        let near = trie.nearby(node, 10);
        assert!(!near.contains(&'一'));
        assert_eq!(near.iter().filter(|&&g| g == '土').count(), 1);
        assert!(near.contains(&'十'));
    }

    #[test]
    fn nearby_stops_at_limit() {
        let mut trie = StrokeTrie::new();
        for (i, glyph) in ('a'..='z').enumerate() {
            let mut seq = vec![Horizontal];
            seq.extend(std::iter::repeat(Vertical).take(i + 1));
            trie.insert(&seq, glyph);
        }

        let node = trie.descend(trie.root(), Horizontal).unwrap();
        let near = trie.nearby(node, 5);
        assert!(near.len() >= 5);
        assert!(near.len() < 26);
        // Shallow glyphs come first in a breadth-first walk.
        assert_eq!(near[0], 'a');
    }

    #[test]
    fn nearby_on_exhausted_subtree_returns_everything() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Vertical, Horizontal], '十');
        let node = trie.descend(trie.root(), Vertical).unwrap();
        assert_eq!(trie.nearby(node, 100), vec!['十']);
    }

    #[test]
    fn nearby_is_breadth_first_across_siblings() {
        let mut trie = StrokeTrie::new();
        trie.insert(&[Horizontal, Turning, Vertical], 'd'); // depth 3
        trie.insert(&[Horizontal, Vertical], 's'); // depth 2
        let node = trie.descend(trie.root(), Horizontal).unwrap();
        assert_eq!(trie.nearby(node, 10), vec!['s', 'd']);
    }
}
