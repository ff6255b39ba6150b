/// CLI configuration
use crate::error::{CliError, Result};
use gz_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "gz.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GzConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Remote catalog document
    #[serde(default)]
    pub url: Option<String>,

    /// Local catalog document (takes precedence over `url`)
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl StorageSettings {
    /// Imported-track file next to the session file (`gz-state.json` ->
    /// `gz-state.imports.json`)
    pub fn imports_path(&self) -> PathBuf {
        self.path.with_extension("imports.json")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub repeat_one: bool,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl GzConfig {
    /// Load configuration from file and `GZ_` environment variables
    ///
    /// Nested keys use a double underscore: `GZ_CATALOG__URL`,
    /// `GZ_PLAYBACK__REPEAT_ONE`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, "GZ")
    }

    /// Load with an explicit environment prefix
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        // An explicit path must exist; the default file is optional
        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.catalog.file, &self.catalog.url) {
            (None, None) => {
                return Err(CliError::Config(
                    "No catalog source (set GZ_CATALOG__URL or GZ_CATALOG__FILE)".to_string(),
                ));
            }
            (None, Some(url)) if url.trim().is_empty() => {
                return Err(CliError::Config("Catalog URL is empty".to_string()));
            }
            _ => {}
        }

        if self.catalog.timeout_secs == 0 {
            return Err(CliError::Config(
                "Catalog timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            shuffle: self.playback.shuffle,
            repeat_one: self.playback.repeat_one,
            shuffle_seed: self.playback.shuffle_seed,
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        url: None,
        file: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        path: default_storage_path(),
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/gz-state.json")
}
