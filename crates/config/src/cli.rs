// CLI configuration
// Loaded from ~/.config/boxkv/config.toml

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    Io(String),
    /// TOML parse / deserialization error.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config IO error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Settings file used when neither --file nor BOXKV_FILE is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,

    /// Let `set` create the settings file when it does not exist yet
    pub create_missing: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_file: None,
            log_level: "warn".to_string(),
            create_missing: true,
        }
    }
}

impl CliConfig {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("boxkv")
            .join("config.toml")
    }

    /// Load config from the default location.
    /// A missing file yields the defaults; a broken one is an error.
    pub fn try_load() -> Result<Self, ConfigError> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        log::debug!("loading config from {}", path.display());
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert!(config.default_file.is_none());
        assert_eq!(config.log_level, "warn");
        assert!(config.create_missing);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = CliConfig::from_toml("default_file = \"/tmp/app.box\"\n").unwrap();
        assert_eq!(config.default_file, Some(PathBuf::from("/tmp/app.box")));
        assert_eq!(config.log_level, "warn");
        assert!(config.create_missing);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = CliConfig::from_toml("create_missing = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxkv/config.toml");

        let config = CliConfig {
            default_file: Some(PathBuf::from("settings.box")),
            log_level: "debug".to_string(),
            create_missing: false,
        };
        config.save_to(&path).unwrap();

        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load_from(&dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
