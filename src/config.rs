//! User configuration and preferences

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::domain::clock::DEFAULT_GESTURE_DISPLAY;
use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    pub welcome_shown: bool,
    /// Photos per session
    pub batch_size: usize,
    /// How long the keep/delete indicator stays on screen
    pub gesture_display_ms: u64,
    /// Ask before each deletion
    pub confirm_delete: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            welcome_shown: false,
            batch_size: DEFAULT_BATCH_SIZE,
            gesture_display_ms: DEFAULT_GESTURE_DISPLAY.as_millis() as u64,
            confirm_delete: true,
        }
    }
}

impl UserConfig {
    /// Get the config file path (~/.config/pswp/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pswp").join("config.json"))
    }

    /// Load config from file, or create default if doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            TriageError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            TriageError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            TriageError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        if config.batch_size == 0 {
            return Err(TriageError::ConfigError(
                "batch_size must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TriageError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TriageError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            TriageError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Marks the welcome dialog as shown and persists it
    pub fn record_welcome_shown(&mut self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            TriageError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.record_welcome_shown_to(&path)
    }

    /// Like [`UserConfig::record_welcome_shown`], but leaves `path` untouched
    /// when it holds a config that does not load.
    pub fn record_welcome_shown_to(&mut self, path: &Path) -> Result<()> {
        self.welcome_shown = true;

        if let Err(e) = Self::load_from(path) {
            return Err(TriageError::ConfigError(format!(
                "Not overwriting {}: {}",
                path.display(),
                e
            )));
        }

        self.save_to(path)
    }

    pub fn gesture_display(&self) -> Duration {
        Duration::from_millis(self.gesture_display_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.gesture_display(), Duration::from_millis(300));
        assert!(config.confirm_delete);
    }

    #[test]
    fn test_config_serialization() {
        let config = UserConfig {
            welcome_shown: true,
            batch_size: 25,
            gesture_display_ms: 500,
            confirm_delete: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // Config files written before the other fields existed
        let config: UserConfig = serde_json::from_str(r#"{"welcome_shown": true}"#).unwrap();
        assert!(config.welcome_shown);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.confirm_delete);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = UserConfig::load_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");
        let config = UserConfig {
            welcome_shown: true,
            ..UserConfig::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(UserConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result = UserConfig::load_from(&path);
        assert!(matches!(result, Err(TriageError::ConfigError(_))));
    }

    #[test]
    fn test_record_welcome_shown() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut config = UserConfig::default();

        config.record_welcome_shown_to(&path).unwrap();

        assert!(config.welcome_shown);
        assert!(UserConfig::load_from(&path).unwrap().welcome_shown);
    }

    #[test]
    fn test_record_welcome_shown_keeps_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let original = r#"{"batch_size": 25, "confirm_delete": fals"#;
        fs::write(&path, original).unwrap();

        // What main falls back to after a failed load
        let mut config = UserConfig::default();
        let result = config.record_welcome_shown_to(&path);

        assert!(matches!(result, Err(TriageError::ConfigError(_))));
        assert!(config.welcome_shown);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_load_rejects_zero_batch_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"batch_size": 0}"#).unwrap();

        let result = UserConfig::load_from(&path);
        assert!(matches!(result, Err(TriageError::ConfigError(_))));
    }
}
