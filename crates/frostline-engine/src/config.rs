//! Engine configuration.
//!
//! Generation parameters and output settings, loaded from and saved to a
//! TOML file. A missing or unreadable file falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use frostline_common::RangeError;
use frostline_scene::{DuneConfig, SnowConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "frostline.toml";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "frostline";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the rendered HTML document is written
    pub output_path: PathBuf,
    /// Document title
    pub page_title: String,
    /// RNG seed (None = different scene every run)
    pub seed: Option<u64>,
    /// Snowfall parameters
    pub snow: SnowConfig,
    /// Drift ridge parameters
    pub dunes: DuneConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("frostline.html"),
            page_title: "Frostline".to_string(),
            seed: None,
            snow: SnowConfig::default(),
            dunes: DuneConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Checks both generator configs before any generation runs.
    pub fn validate(&self) -> Result<(), RangeError> {
        self.snow.validate()?;
        self.dunes.validate()
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        config_dir().map_or_else(|| PathBuf::from(CONFIG_FILE), |dir| dir.join(CONFIG_FILE))
    }
}

/// Frostline's directory under the platform config directory.
///
/// Tries `$XDG_CONFIG_HOME` first, then `~/.config`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            return Some(PathBuf::from(config_home).join(CONFIG_DIR_NAME));
        }
    }

    dirs::home_dir().map(|home| home.join(".config").join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.snow.count, 200);
        assert_eq!(config.snow.layers, 4);
        assert_eq!(config.dunes.count, 8);
        assert!(config.seed.is_none());
        assert_eq!(config.output_path, PathBuf::from("frostline.html"));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = EngineConfig::default();
        config.snow.count = 50;
        config.dunes.max_length = 1200.0;
        config.seed = Some(7);
        config.save_to(&path).expect("save");

        let loaded = EngineConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = 3\n[snow]\ncount = 10\n").expect("write");

        let config = EngineConfig::load_from(&path);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.snow.count, 10);
        assert_eq!(config.snow.layers, 4);
        assert_eq!(config.dunes, DuneConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = EngineConfig::load_from(dir.path().join("absent.toml"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[snow]\ncount = -4\n").expect("write");

        assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
    }

    #[test]
    fn test_validate_rejects_inverted_lengths() {
        let mut config = EngineConfig::default();
        config.dunes.min_length = 300.0;
        config.dunes.max_length = 100.0;
        assert!(matches!(
            config.validate(),
            Err(RangeError::InvertedLength { .. })
        ));
    }
}
