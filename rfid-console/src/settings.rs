//! Application settings
//!
//! The hardware-identifier list lives in a JSON file so new reader boards can
//! be added without a rebuild. The file is read on every startup.

use std::path::{Path, PathBuf};

use rfid_detect::MatchConfig;
use rfid_session::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to create settings directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Which devices count as an RFID reader
    #[serde(flatten)]
    pub matching: MatchConfig,
    /// How the reader's port is opened
    #[serde(flatten)]
    pub session: SessionConfig,
}

impl Settings {
    /// Get the XDG config directory for rfid-reader
    /// Uses $XDG_CONFIG_HOME/rfid-reader, falls back to ~/.config/rfid-reader
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("rfid-reader"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("rfid-reader"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_init() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("Could not determine settings path, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    ///
    /// A missing file is created with the defaults. An unreadable or
    /// malformed file is left alone and the defaults are used.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                match settings.save_to(path) {
                    Ok(()) => info!("Wrote default settings to {}", path.display()),
                    Err(e) => warn!("{e}"),
                }
                return settings;
            }
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;

        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rfid-reader-test-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn test_defaults_match_reader_hardware() {
        let settings = Settings::default();
        assert_eq!(settings.matching.hardware_ids, vec!["CH340", "Arduino"]);
        assert!(settings.matching.port_markers.iter().any(|m| m == "(COM"));
        assert_eq!(settings.session.baud_rate, 9600);
        assert!(settings.session.discard_null);
    }

    #[test]
    fn test_settings_json_is_flat() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("hardware_ids").is_some());
        assert!(json.get("baud_rate").is_some());
        assert!(json.get("discard_null").is_some());
        assert!(json.get("read_buffer_size").is_some());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"hardware_ids":["CH340","Arduino","CP210x"],"baud_rate":115200}"#)
                .unwrap();

        assert_eq!(settings.matching.hardware_ids.len(), 3);
        assert_eq!(settings.matching.port_markers, MatchConfig::default().port_markers);
        assert_eq!(settings.session.baud_rate, 115200);
        assert!(settings.session.discard_null);
    }

    #[test]
    fn test_missing_file_is_initialized() {
        let path = scratch_path("init");
        let _ = std::fs::remove_file(&path);

        let settings = Settings::load_from(&path);

        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_saved_settings_are_reloaded() {
        let path = scratch_path("reload");
        let mut settings = Settings::default();
        settings.matching.hardware_ids.push("FT232".to_string());

        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
