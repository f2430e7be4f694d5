//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/gridsnap/config.json`.
//! Every section is optional; a minimal `{}` file is valid and all sections
//! fall back to their compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "grid": { "max_columns": 5, "max_rows": 5 },
//!   "hotkeys": { "modifiers": "ctrl+alt" },
//!   "disabled_divisions": [
//!     { "columns": 5, "rows": 5, "x": 3, "y": 3 }
//!   ]
//! }
//! ```

use crate::geometry::Division;
use crate::hotkey::Modifiers;
use crate::preferences::DivisionPreferences;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Largest grid to generate divisions for.
    #[serde(default)]
    pub grid: GridConfig,

    /// Hotkey modifier settings.
    #[serde(default)]
    pub hotkeys: HotkeyConfig,

    /// Divisions that start out disabled.  Everything else starts enabled.
    #[serde(default)]
    pub disabled_divisions: Vec<Division>,
}

/// Largest grid size considered.
///
/// Values of `0` or below mean no divisions at all; values above
/// [`MAX_GRID`](crate::preferences::MAX_GRID) are clamped to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub max_columns: i32,
    pub max_rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_columns: 5,
            max_rows: 5,
        }
    }
}

/// Modifier mask applied to every numpad hotkey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub modifiers: Modifiers,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Build the initial division preferences: everything up to the maximum
    /// grid enabled, minus [`disabled_divisions`](Self::disabled_divisions).
    pub fn preferences(&self) -> DivisionPreferences {
        let mut prefs = DivisionPreferences::new(self.grid.max_columns, self.grid.max_rows);
        for division in &self.disabled_divisions {
            if prefs.set_enabled(*division, false).is_none() {
                warn!("disabled division {} is outside the grid, ignoring", division);
            }
        }
        prefs
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
