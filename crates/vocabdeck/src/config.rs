//! Configuration management for vocabdeck.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::Language;
use crate::store::DEFAULT_STORE_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "vocabdeck";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "vocab.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "VOCABDECK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `VOCABDECK_`, sections separated
///    by `__`, e.g. `VOCABDECK_STORAGE__STORE_KEY`)
/// 2. TOML config file at `~/.config/vocabdeck/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Study game configuration.
    pub study: StudyConfig,
    /// Dictionary listing configuration.
    pub dictionary: DictionaryConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/vocabdeck/vocab.db`
    pub database_path: Option<PathBuf>,
    /// Key the vocabulary is stored under.
    pub store_key: String,
}

/// Study game configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Language selected when `study` is run without one.
    pub default_language: Option<Language>,
    /// Start on a random card instead of the first.
    pub shuffle_on_start: bool,
}

/// Dictionary listing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Output format used when `dict` is run without `--format`.
    pub default_format: ListFormat,
}

/// How dictionary listings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFormat {
    /// `word - meaning` lines.
    #[default]
    Plain,
    /// Aligned columns.
    Table,
    /// JSON array of entries.
    Json,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.store_key.trim().is_empty() {
            return Err(Error::config_validation("store_key must not be empty"));
        }

        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::config_validation(
                    "database_path must not be empty when set",
                ));
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.storage.store_key, "vocab");
        assert!(config.storage.database_path.is_none());
        assert!(config.study.default_language.is_none());
        assert!(!config.study.shuffle_on_start);
        assert_eq!(config.dictionary.default_format, ListFormat::Plain);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_store_key() {
        let mut config = Config::default();
        config.storage.store_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("store_key"));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("database_path"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("vocab.db"));
        assert!(path.to_string_lossy().contains("vocabdeck"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/words.db"));

        assert_eq!(config.database_path(), PathBuf::from("/custom/path/words.db"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("vocabdeck"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[storage]
database_path = "/tmp/words.db"
store_key = "words"

[study]
default_language = "French"
shuffle_on_start = true

[dictionary]
default_format = "table"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/words.db"));
        assert_eq!(config.storage.store_key, "words");
        assert_eq!(config.study.default_language, Some(Language::French));
        assert!(config.study.shuffle_on_start);
        assert_eq!(config.dictionary.default_format, ListFormat::Table);
    }

    #[test]
    fn test_load_invalid_toml_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[study]\ndefault_language = \"Klingon\"").unwrap();

        let result = Config::load_from(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(Error::ConfigLoad(_))));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nstore_key = \"\"").unwrap();

        let result = Config::load_from(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("store_key"));
        assert!(json.contains("shuffle_on_start"));
        assert!(json.contains("\"plain\""));
    }

    #[test]
    fn test_study_config_deserialize() {
        let json = r#"{"default_language": "German"}"#;
        let study: StudyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(study.default_language, Some(Language::German));
        assert!(!study.shuffle_on_start);
    }
}
