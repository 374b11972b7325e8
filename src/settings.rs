// File: src/settings.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Per-glyph fields the result list can show next to each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayField {
    OnReading,
    KunReading,
    Meaning,
    RemainingStrokes,
}

/// User configuration, threaded explicitly into the session and the
/// front-end. No global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which fields to show, in order.
    pub display: Vec<DisplayField>,
    /// Maximum number of nearby candidates shown beyond exact matches.
    pub lookahead: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            display: vec![
                DisplayField::OnReading,
                DisplayField::KunReading,
                DisplayField::Meaning,
                DisplayField::RemainingStrokes,
            ],
            lookahead: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("lookahead must be at least 1")]
    ZeroLookahead,
}

impl Settings {
    /// Loads settings from a JSON file; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        if settings.lookahead == 0 {
            return Err(SettingsError::ZeroLookahead);
        }
        Ok(settings)
    }
}
