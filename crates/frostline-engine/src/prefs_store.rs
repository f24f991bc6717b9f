//! File-backed preference store.
//!
//! Preferences are a flat string table persisted as TOML:
//! - Path: ~/.config/frostline/settings.toml
//! - Loaded on startup, written on every change

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use frostline_common::{SceneError, SceneResult};
use frostline_scene::PreferenceStore;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::config_dir;

/// Default preferences file name.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Errors that can occur during preference file operations.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

}

impl From<PreferencesError> for SceneError {
    fn from(err: PreferencesError) -> Self {
        match err {
            PreferencesError::Io(e) => Self::Io(e),
            other => Self::Serialization(other.to_string()),
        }
    }
}

/// Preference store persisted to a TOML file.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    /// Current values.
    values: BTreeMap<String, String>,
    /// Path to the preferences file.
    path: PathBuf,
}

impl TomlPreferenceStore {
    /// Opens the store at the default path.
    pub fn open_default() -> Result<Self, PreferencesError> {
        Self::open(Self::default_path())
    }

    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("Preferences file not found, starting empty");
            return Ok(Self {
                values: BTreeMap::new(),
                path,
            });
        }

        let contents = fs::read_to_string(&path)?;
        let values = parse_values(&contents);
        info!("Preferences loaded from {:?}", path);
        Ok(Self { values, path })
    }

    /// Returns the default preferences path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        config_dir().map_or_else(
            || PathBuf::from(SETTINGS_FILE_NAME),
            |dir| dir.join(SETTINGS_FILE_NAME),
        )
    }

    /// Returns the preferences file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all values to disk.
    pub fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, toml)?;

        info!("Preferences saved to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the string entries of a preferences file.
///
/// Entries of any other type are skipped, and a file that is not valid TOML
/// yields an empty table; both are logged.
fn parse_values(contents: &str) -> BTreeMap<String, String> {
    let table: toml::Table = match toml::from_str(contents) {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to parse preferences file, starting empty: {e}");
            return BTreeMap::new();
        },
    };

    table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(value) => Some((key, value)),
            other => {
                warn!(key = %key, kind = other.type_str(), "Ignoring non-string preference");
                None
            },
        })
        .collect()
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> SceneResult<()> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            match previous {
                Some(previous) => self.values.insert(key.to_string(), previous),
                None => self.values.remove(key),
            };
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SceneResult<()> {
        let Some(previous) = self.values.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.save() {
            self.values.insert(key.to_string(), previous);
            return Err(e.into());
        }
        Ok(())
    }
}
