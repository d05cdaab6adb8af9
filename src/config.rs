//! Configuration loading for trailmap.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.trailmap/config.toml`)
//! 3. User config (`~/.trailmap/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with the built-in catalog
//! and sensible defaults when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::core::Catalog;
use crate::error::{FailOpen, Result, TrailmapError};
use crate::util::read_to_string_limited;

/// Main configuration struct for trailmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Resource catalog configuration.
    pub catalog: CatalogConfig,
    /// Output formatting configuration.
    pub display: DisplayConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Resource catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file (JSON or TOML) replacing the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// `chrono` format string for milestone due dates.
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Valid values for the logging level field.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
    pub level: String,
}

impl LoggingConfig {
    /// Check if a log level value is valid.
    pub fn is_valid_level(value: &str) -> bool {
        VALID_LOG_LEVELS.contains(&value)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.trailmap/config.toml` in cwd)
    /// 3. User config (`~/.trailmap/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<trailmap_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = trailmap_home()?;
        Self::load_optional(&home.join("config.toml"))
    }

    /// Load project config from `.trailmap/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        Self::load_optional(&project_config_path(cwd))
    }

    /// Load a config file that may legitimately be absent.
    ///
    /// A missing file is silent; a present but broken file is reported.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let result = Self::load_from_file(path).map(Some);
        result.fail_open_default(&format!("loading config {}", path.display()))
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = read_to_string_limited(path)?;
        toml::from_str(&content).map_err(|e| TrailmapError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // TRAILMAP_CATALOG
        if let Ok(val) = env::var("TRAILMAP_CATALOG") {
            if val.is_empty() {
                self.catalog.path = None;
            } else {
                self.catalog.path = Some(PathBuf::from(val));
            }
        }

        // TRAILMAP_DATE_FORMAT
        if let Ok(val) = env::var("TRAILMAP_DATE_FORMAT") {
            if val.trim().is_empty() {
                eprintln!(
                    "Warning: Empty TRAILMAP_DATE_FORMAT value. Using default '{}'.",
                    self.display.date_format
                );
            } else {
                self.display.date_format = val;
            }
        }

        // TRAILMAP_LOG_LEVEL
        if let Ok(val) = env::var("TRAILMAP_LOG_LEVEL") {
            let level = val.to_lowercase();
            if LoggingConfig::is_valid_level(&level) {
                self.logging.level = level;
            } else {
                eprintln!(
                    "Warning: Invalid TRAILMAP_LOG_LEVEL value '{}'. \
                    Valid values: {:?}. Using default '{}'.",
                    val, VALID_LOG_LEVELS, self.logging.level
                );
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence, field by field. A field equal to
    /// its default in `other` does not override a customized value in
    /// `self`, so each layer only needs to list its customizations.
    fn merge(mut self, other: Config) -> Self {
        if other.catalog.path.is_some() {
            self.catalog.path = other.catalog.path;
        }

        if other.display.date_format != DisplayConfig::default().date_format {
            self.display.date_format = other.display.date_format;
        }

        if other.logging.level != LoggingConfig::default().level {
            if LoggingConfig::is_valid_level(&other.logging.level) {
                self.logging.level = other.logging.level;
            } else {
                tracing::warn!(
                    level = %other.logging.level,
                    "ignoring invalid logging.level in config"
                );
            }
        }

        self
    }

    /// Resolve the catalog this config points at.
    ///
    /// Without a configured path this is the built-in catalog. A configured
    /// path that cannot be loaded logs a warning and also falls back to the
    /// built-in catalog.
    pub fn resolve_catalog(&self) -> Catalog {
        match &self.catalog.path {
            Some(path) => Catalog::load_from_file(path)
                .fail_open_with("loading configured catalog", Catalog::builtin()),
            None => Catalog::builtin(),
        }
    }
}

/// Get the trailmap home directory.
///
/// Checks `TRAILMAP_HOME` first, then falls back to `~/.trailmap`. An empty
/// `TRAILMAP_HOME` is ignored.
pub fn trailmap_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("TRAILMAP_HOME") {
        if home.is_empty() {
            tracing::warn!("TRAILMAP_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("TRAILMAP_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    dirs::home_dir().map(|home| home.join(".trailmap"))
}

/// Get the project trailmap directory: `<cwd>/.trailmap/`.
pub fn project_dir(cwd: &Path) -> PathBuf {
    cwd.join(".trailmap")
}

/// Get the project config path: `<cwd>/.trailmap/config.toml`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    project_dir(cwd).join("config.toml")
}
