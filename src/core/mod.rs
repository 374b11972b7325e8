// src/core/mod.rs

pub mod classify;
pub mod decompose;
pub mod engine;
pub mod session;
pub mod trie;
pub mod types;
