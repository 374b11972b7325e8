// src/core/session.rs
use crate::core::engine::LookupEngine;
use crate::core::trie::TrieNode;
use crate::core::types::StrokeCategory;

/// What the session has to report after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryReport {
    /// Empty prefix: nothing entered yet, nothing to show.
    AtRoot,
    /// The prefix names a live trie node.
    Matches {
        prefix: String,
        /// Glyphs whose sequence terminates exactly at the prefix.
        exact: Vec<char>,
        /// Nearby glyphs below the prefix, ranked by ascending stroke
        /// count and truncated to the configured lookahead.
        candidates: Vec<char>,
    },
    /// The prefix left the index. Carries what was typed so the user can
    /// see it; backtracking or reset is the way out.
    NoMatch { prefix: String },
}

/// The user's current position in the index.
///
/// Holds the entered prefix, the current node (or none after a failed
/// descent) and one stack entry per entered digit for single-step
/// backtracking. The trie itself stays immutable; this is the only
/// traversal state in the system.
pub struct Session<'e> {
    engine: &'e LookupEngine,
    lookahead: usize,
    prefix: String,
    node: Option<&'e TrieNode>,
    stack: Vec<Option<&'e TrieNode>>,
}

impl<'e> Session<'e> {
    pub fn new(engine: &'e LookupEngine, lookahead: usize) -> Self {
        Session {
            engine,
            lookahead,
            prefix: String::new(),
            node: Some(engine.trie().root()),
            stack: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_at_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Enters one stroke digit. The previous position is pushed on the
    /// backtrack stack whether or not the descent succeeds; a failed
    /// descent moves to the no-match state but still records the digit.
    pub fn enter_digit(&mut self, category: StrokeCategory) {
        self.stack.push(self.node);
        self.node = self
            .node
            .and_then(|node| self.engine.trie().descend(node, category));
        self.prefix.push(char::from(b'0' + category.as_digit()));
    }

    /// Undoes the most recent digit. Returns false (and does nothing)
    /// at the root.
    pub fn backtrack(&mut self) -> bool {
        if self.prefix.is_empty() {
            return false;
        }
        match self.stack.pop() {
            Some(previous) => {
                self.node = previous;
                self.prefix.pop();
                true
            }
            None => false,
        }
    }

    /// Back to the empty prefix at the root, unconditionally.
    pub fn reset(&mut self) {
        self.prefix.clear();
        self.stack.clear();
        self.node = Some(self.engine.trie().root());
    }

    /// Assembles the report for the current position.
    pub fn report(&self) -> QueryReport {
        if self.prefix.is_empty() {
            return QueryReport::AtRoot;
        }
        match self.node {
            None => QueryReport::NoMatch { prefix: self.prefix.clone() },
            Some(node) => {
                let trie = self.engine.trie();
                let mut candidates = trie.nearby(node, self.lookahead);
                // Fewest remaining strokes first; codepoint settles ties.
                candidates
                    .sort_by_key(|&glyph| (self.engine.stroke_count(glyph), glyph as u32));
                candidates.truncate(self.lookahead);
                QueryReport::Matches {
                    prefix: self.prefix.clone(),
                    exact: trie.collect_at(node).to_vec(),
                    candidates,
                }
            }
        }
    }
}
