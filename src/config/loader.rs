//! Loader for motion tuning files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::MotionConfig;

/// Error type for tuning file loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a `MotionConfig` from RON text. `source` only labels errors.
pub fn parse_motion_config_ron(source: &str, contents: &str) -> Result<MotionConfig, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: source.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parse a `MotionConfig` from JSON text (tooling exports use JSON).
pub fn parse_motion_config_json(
    source: &str,
    contents: &str,
) -> Result<MotionConfig, ConfigLoadError> {
    serde_json::from_str(contents).map_err(|e| ConfigLoadError {
        file: source.to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Load a tuning file, picking the format from the extension.
/// `.json` is parsed as JSON, anything else as RON.
pub fn load_motion_config(path: &Path) -> Result<MotionConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_motion_config_json(&file_name, &contents)
    } else {
        parse_motion_config_ron(&file_name, &contents)
    }
}
