use crate::error::LoadFailure;
use crate::fetch::CatalogSource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoHomeDir => "No home directory, using built-in settings".to_string(),
            ConfigError::Io { path, .. } => format!("Config file not readable: {}", path.display()),
            ConfigError::Parse { path, source } => {
                format!("Config file {} is malformed (line {})", path.display(), source.line())
            }
            ConfigError::Invalid(msg) => format!("Invalid setting: {}", msg),
        }
    }
}

/// Site settings, read from `config.json` in the platform config directory.
/// Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Where the site is served from: an http(s) URL, `file://` URL or a
    /// directory.
    pub base_url: String,
    pub catalog_path: String,
    /// Titles shown on the home page, in display order.
    pub featured_titles: Vec<String>,
    /// Category choices of the games page filter.
    pub categories: Vec<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            catalog_path: "data/games.json".to_string(),
            featured_titles: vec![
                "Path of Exile".to_string(),
                "Judgment".to_string(),
                "Stardew Valley".to_string(),
            ],
            categories: ["Action", "RPG", "Sim", "Strategy"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            request_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "gamehub", "game-catalog")
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = Self::project_dirs().ok_or(ConfigError::NoHomeDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if self.catalog_path.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog_path is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn catalog_source(&self) -> Result<CatalogSource, LoadFailure> {
        CatalogSource::resolve(&self.base_url, &self.catalog_path)
    }
}
