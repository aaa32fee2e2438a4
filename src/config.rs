//! Configuration module for the workspace search system.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `WS_` and use double underscores
//! to separate nested levels:
//! - `WS_INDEX__COMMIT_MODE=document` sets `index.commit_mode`
//! - `WS_SEARCH__MAX_RESULTS=50` sets `search.max_results`
//! - `WS_LOGGING__LEVEL=debug` sets `logging.level`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{IndexError, IndexResult};

const CONFIG_DIR: &str = ".workspace-search";
const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory that holds the index and its metadata
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Index store settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Query settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// When the reindex coordinator commits.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// One commit per reindex or delete call; readers never see a half-built workspace
    #[default]
    Batch,
    /// One commit after the delete and after every document
    Document,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexConfig {
    /// Keep the index in memory instead of under `data_dir`
    #[serde(default = "default_false")]
    pub in_memory: bool,

    /// Memory budget of the index writer in bytes
    #[serde(default = "default_writer_heap_bytes")]
    pub writer_heap_bytes: usize,

    #[serde(default)]
    pub commit_mode: CommitMode,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Disable to run with a search component that indexes nothing
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of hits returned by one search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(CONFIG_DIR)
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_writer_heap_bytes() -> usize {
    50_000_000
}
fn default_max_results() -> usize {
    20
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_dir: default_data_dir(),
            debug: false,
            index: IndexConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            in_memory: false,
            writer_heap_bytes: default_writer_heap_bytes(),
            commit_mode: CommitMode::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: default_max_results(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Settings for an in-memory index, used by tests and ephemeral hosts
    pub fn in_memory() -> Self {
        let mut settings = Self::default();
        settings.index.in_memory = true;
        settings
    }

    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::extract(Self::figment(config_path))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Box<figment::Error>> {
        Self::extract(Self::figment(path.as_ref().to_path_buf()))
    }

    fn extract(figment: Figment) -> Result<Self, Box<figment::Error>> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings
            .validate()
            .map_err(|e| Box::new(figment::Error::from(e.to_string())))?;
        Ok(settings)
    }

    /// Reject values the index or query engine cannot run with
    pub fn validate(&self) -> IndexResult<()> {
        if self.search.max_results == 0 {
            return Err(IndexError::ConfigError {
                reason: "search.max_results must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscores stay in field names
            .merge(Env::prefixed("WS_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the settings file by looking for a config directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Location of the tantivy index files
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index")
    }

    /// Save current configuration to file
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);
        Self::write_config_template(&config_path, force)?;
        Ok(config_path)
    }

    fn write_config_template(
        config_path: &std::path::Path,
        force: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = r#"# Workspace Search Configuration File

# Version of the configuration schema
version = 1

# Directory holding the index ("index/") and its metadata ("index.meta")
data_dir = ".workspace-search"

# Global debug mode
debug = false

[index]
# Keep the index in memory (nothing survives a restart)
in_memory = false

# Memory budget of the index writer in bytes
writer_heap_bytes = 50000000

# "batch": one commit per reindex, searches never see a half-built workspace
# "document": commit after every document
commit_mode = "batch"

[search]
# Set to false to run without search (every operation becomes a no-op)
enabled = true

# Maximum number of results returned by one search
max_results = 20

[logging]
# trace, debug, info, warn or error
level = "warn"
"#;

        std::fs::write(config_path, template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.data_dir, PathBuf::from(".workspace-search"));
        assert_eq!(settings.index_path(), PathBuf::from(".workspace-search/index"));
        assert_eq!(settings.index.commit_mode, CommitMode::Batch);
        assert_eq!(settings.search.max_results, 20);
        assert!(settings.search.enabled);
        assert!(!settings.index.in_memory);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2
data_dir = "/var/lib/search"

[index]
commit_mode = "document"
writer_heap_bytes = 20000000

[search]
max_results = 5
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.index_path(), PathBuf::from("/var/lib/search/index"));
        assert_eq!(settings.index.commit_mode, CommitMode::Document);
        assert_eq!(settings.index.writer_heap_bytes, 20_000_000);
        assert_eq!(settings.search.max_results, 5);
        // Untouched sections keep their defaults
        assert!(settings.search.enabled);
    }

    #[test]
    fn test_zero_max_results_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[search]\nmax_results = 0\n").unwrap();

        let err = Settings::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("search.max_results must be at least 1"));

        let mut settings = Settings::default();
        settings.search.max_results = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, IndexError::ConfigError { .. }));
        assert_eq!(err.status_code(), "CONFIG_ERROR");

        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.search.max_results = 3;
        settings.index.in_memory = true;

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.search.max_results, 3);
        assert!(loaded.index.in_memory);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        Settings::write_config_template(&config_path, false).unwrap();
        assert!(Settings::write_config_template(&config_path, false).is_err());
        Settings::write_config_template(&config_path, true).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        let parsed: Settings = toml::from_str(&content).unwrap();
        let defaults = Settings::default();
        assert_eq!(parsed.data_dir, defaults.data_dir);
        assert_eq!(parsed.index.commit_mode, defaults.index.commit_mode);
        assert_eq!(parsed.search.max_results, defaults.search.max_results);
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[logging]\nlevel = \"info\"\n").unwrap();

        unsafe {
            std::env::set_var("WS_LOGGING__LEVEL", "debug");
        }

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.logging.level, "debug");

        unsafe {
            std::env::remove_var("WS_LOGGING__LEVEL");
        }
    }
}
