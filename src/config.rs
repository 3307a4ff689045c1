//! User settings
//!
//! Read once at startup from `<config dir>/goblin-pit/settings.ron`.
//! Every field has a default, so a partial file (or no file) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scenario loaded by "Quick Start" instead of the built-in one
    pub default_scenario: Option<PathBuf>,
    /// Where the load dialog opens and where quick saves go
    pub scenario_dir: PathBuf,
    /// Blocks moved per arrow key press
    pub scroll_step: f32,
    /// Multiplier for `scroll_step` while Shift is held
    pub fast_scroll_multiplier: f32,
    /// Initial pixels per block in the game view
    pub default_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_scenario: None,
            scenario_dir: PathBuf::from("assets/userdata/scenarios"),
            scroll_step: 1.0,
            fast_scroll_multiplier: 6.0,
            default_scale: 24.0,
        }
    }
}

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    /// Standard location of the settings file, if the platform has one
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("goblin-pit").join("settings.ron"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    /// Parse a settings file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Load settings from the standard location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        Self::load_or_default(&path)
    }

    /// Load from `path`; a missing file is silent, a broken one logs a warning
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(scroll_step: 2.5, default_scenario: Some(\"maps/big.ron\"))").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.scroll_step, 2.5);
        assert_eq!(settings.default_scenario, Some(PathBuf::from("maps/big.ron")));
        assert_eq!(settings.fast_scroll_multiplier, 6.0);
        assert_eq!(settings.scenario_dir, PathBuf::from("assets/userdata/scenarios"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("absent.ron"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(scroll_step: \"fast\")").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::ParseError(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
