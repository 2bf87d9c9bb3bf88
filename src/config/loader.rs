//! Configuration file loading.

use crate::config::schema::GateConfig;
use crate::error::{GateError, Result};
use std::fs;
use std::path::Path;

/// Load a config file and parse it into [`GateConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config(path: &Path) -> Result<GateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GateError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`GateConfig`].
///
/// An empty document yields the default (empty) configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GateConfig> {
    if content.trim().is_empty() {
        return Ok(GateConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| GateError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
