use std::path::Path;

use serde::Deserialize;

use crate::abstract_editor::UNLIMITED;

/// History settings loaded from a TOML file.
///
/// ```toml
/// history_limit = 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undoable actions. `0` keeps everything.
    pub history_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_limit: UNLIMITED,
        }
    }
}

/// Parse a history config from TOML text.
pub fn parse_config(content: &str) -> Result<HistoryConfig, String> {
    toml::from_str(content).map_err(|e| format!("invalid history config: {e}"))
}

/// Load a history config from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_config(path: &Path) -> Result<HistoryConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Load a history config, falling back to the default if the file is missing
/// or malformed.
pub fn load_or_default(path: &Path) -> HistoryConfig {
    match load_config(path) {
        Ok(config) => {
            log::info!("Loaded history config (limit {})", config.history_limit);
            config
        }
        Err(e) => {
            log::warn!("{e}; using default history config");
            HistoryConfig::default()
        }
    }
}
