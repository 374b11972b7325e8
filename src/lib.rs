// src/lib.rs

pub mod core;
pub mod kanjidic;
pub mod kanjivg;
pub mod persistence;
pub mod settings;

pub use crate::core::engine::LookupEngine;
pub use crate::core::session::{QueryReport, Session};
