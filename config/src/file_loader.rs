//! # Configuration File Loading
//!
//! Loads platform settings from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::config::PlatformSettings;
use std::path::Path;

/// Configuration file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String)
}

/// Load settings from a TOML file.
///
/// ## Error Handling
/// Returns `ConfigFileError` for a missing file or invalid TOML syntax.
/// Field-level validation happens later in `PlatformConfig::new`.
pub fn load_from_toml(path: &Path) -> Result<PlatformSettings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))
}

/// Load settings from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<PlatformSettings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))
}

/// Load settings from file, detecting the format from its extension.
///
/// # M-CANONICAL-DOCS
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_file;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = load_from_file(Path::new("platform.toml"))?;
///     println!("Issuer: {}", settings.issuer);
///     Ok(())
/// }
/// ```
pub fn load_from_file(path: &Path) -> Result<PlatformSettings, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string()))
    }
}
