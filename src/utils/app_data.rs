use crate::codec::Translation;
use crate::output::HeaderLocale;
use crate::query::UnionMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "versefind";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Translation loaded when none is given on the command line
    #[serde(default)]
    pub translation: Translation,

    /// Directory holding `<translation>.txt` flat files
    /// If None, `<app data>/data` is used
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Language of chapter header labels
    #[serde(default)]
    pub locale: HeaderLocale,

    /// Quiet period before a typed query is run
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How results of several `;` clauses are combined
    #[serde(default)]
    pub union: UnionMode,

    /// Query shown when the interactive view opens
    #[serde(default = "default_initial_query")]
    pub initial_query: String,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_initial_query() -> String {
    "genesis".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            translation: Translation::default(),
            data_dir: None,
            locale: HeaderLocale::default(),
            debounce_ms: default_debounce_ms(),
            union: UnionMode::default(),
            initial_query: default_initial_query(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Directory the flat-file source reads from
    pub fn effective_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_app_data_dir()?.join("data")),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the directory holding cached passage collections
pub fn get_store_dir() -> Result<PathBuf> {
    let store_dir = get_app_data_dir()?.join("stores");
    fs::create_dir_all(&store_dir)?;
    Ok(store_dir)
}
