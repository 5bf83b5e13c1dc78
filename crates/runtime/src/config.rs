//! Plugin configuration and user settings.
//!
//! [`PluginConfig`] decides where state lives and is read from the
//! environment. [`Settings`] is the plugin's own settings object, saved in the
//! same store as widget state under a reserved key.
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{Result, RuntimeError};
use crate::store::{FileStore, InMemoryStore, KeyValueStore};

/// Where and how widget state is persisted.
#[derive(Clone, Debug)]
pub struct PluginConfig {
    /// Directory holding the store file.
    pub data_dir: PathBuf,
    /// File name of the JSON store inside `data_dir`.
    pub store_file: String,
    /// `false` keeps all state in memory for the lifetime of the plugin.
    pub persistence: bool,
}

impl PluginConfig {
    pub const DEFAULT_STORE_FILE: &'static str = "data.json";

    /// Build configuration from environment variables with sensible defaults.
    ///
    /// - `SHEET_DATA_DIR`: store directory
    /// - `SHEET_STORE_FILE`: store file name
    /// - `SHEET_PERSISTENCE`: `false`/`0`/`no`/`off` selects the in-memory store
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("SHEET_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(file) = read_env::<String>("SHEET_STORE_FILE").filter(|file| !file.is_empty())
        {
            config.store_file = file;
        }
        if let Some(persistence) = read_env_bool("SHEET_PERSISTENCE") {
            config.persistence = persistence;
        }

        config
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// Open the store this configuration describes.
    pub async fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        if !self.persistence {
            return Ok(Arc::new(InMemoryStore::new()));
        }
        let store = FileStore::open(self.store_path()).await?;
        Ok(Arc::new(store))
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: Self::DEFAULT_STORE_FILE.to_string(),
            persistence: true,
        }
    }
}

/// Platform data directory for the plugin.
///
/// - macOS: `~/Library/Application Support/sheet`
/// - Linux: `~/.local/share/sheet` (or `$XDG_DATA_HOME/sheet`)
/// - Windows: `%APPDATA%\sheet`
/// - Fallback: `./.sheet-data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "sheet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./.sheet-data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// User-facing plugin settings.
///
/// Saved values are merged over the defaults, so settings added in a later
/// version pick up their default until the user changes them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "mySetting")]
    pub my_setting: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            my_setting: "default".to_string(),
        }
    }
}

impl Settings {
    /// Store key settings are saved under. Widget state keys must not use it.
    pub const STORE_KEY: &'static str = "__settings";

    /// Load settings, falling back to defaults when nothing usable is saved.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORE_KEY).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(error = %err, "saved settings are malformed; using defaults");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(error = %err, "failed to load settings; using defaults");
                Self::default()
            }
        }
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let value = serde_json::to_value(self).map_err(RuntimeError::State)?;
        store.set(Self::STORE_KEY, value).await?;
        Ok(())
    }
}
