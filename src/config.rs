//! Configuration for the search host: transport settings plus the ordered
//! source list, read from TOML.
//!
//! ```toml
//! [search]
//! timeout_seconds = 8
//!
//! [[sources]]
//! kind = "profiles"
//! path = "/search"
//!
//! [[sources]]
//! kind = "datasets"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wprdc_search::{SearchConfig, SourceKind, SourceSpec};

use crate::error::{AppError, Result};

/// Top-level configuration for the search host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Transport settings for every aggregation run.
    pub search: SearchConfig,
    /// Sources queried for every search, in output order.
    pub sources: Vec<SourceSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            sources: vec![
                SourceSpec::new(SourceKind::Profiles, "/search"),
                SourceSpec::new(SourceKind::Datasets, SourceKind::Datasets.default_path()),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Self::default_config_path();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading default config file");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path: `~/.config/wprdc/search.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("wprdc").join("search.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("wprdc")
                .join("search.toml")
        } else {
            PathBuf::from("/tmp/wprdc-config/search.toml")
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - at least one source is configured
    /// - every configured path starts with `/`
    /// - every configured host is a bare http(s) origin
    /// - the transport settings pass [`SearchConfig::validate`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(AppError::Config(
                "at least one source must be configured".into(),
            ));
        }
        for spec in &self.sources {
            if let Some(path) = spec.path.as_deref() {
                if !path.starts_with('/') {
                    return Err(AppError::Config(format!(
                        "{} source path `{path}` must start with `/`",
                        spec.kind
                    )));
                }
            }
            if let Some(host) = spec.host.as_deref() {
                wprdc_search::parse_origin(host).map_err(|e| {
                    AppError::Config(format!("{} source host: {e}", spec.kind))
                })?;
            }
        }
        self.search
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
