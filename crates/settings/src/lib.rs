//! Persisted indicator settings.
//!
//! Headset preferences applied through the tray menu (sidetone, LED,
//! auto power-off) survive restarts in a JSON file under the user config
//! dir and are pushed back to the headset on startup. Battery thresholds
//! and the poll interval are command-line flags, not settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk settings format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sidetone_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    led_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inactive_time_min: Option<u8>,
}

/// Indicator settings.
///
/// Every field is optional: a preference stays unset until the user first
/// touches it from the menu, and unset preferences are never pushed to
/// the headset.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sidetone_level: Option<u8>,
    pub led_on: Option<bool>,
    pub inactive_time_min: Option<u8>,
    file_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sidetone_level: None,
            led_on: None,
            inactive_time_min: None,
            file_path: settings_file_path(),
        }
    }
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Self {
        Self::load_from(settings_file_path())
    }

    /// Loads settings from an explicit path.
    ///
    /// A missing file yields defaults; an unparseable file is reported
    /// and also yields defaults rather than aborting startup.
    pub fn load_from(file_path: PathBuf) -> Self {
        let mut settings = Settings {
            file_path: file_path.clone(),
            ..Default::default()
        };

        if file_path.exists() {
            let content = std::fs::read_to_string(&file_path).unwrap_or_default();
            if let Ok(file) = serde_json::from_str::<SettingsFile>(&content) {
                settings.sidetone_level = file.sidetone_level;
                settings.led_on = file.led_on;
                settings.inactive_time_min = file.inactive_time_min;
            } else {
                tracing::warn!(
                    path = %file_path.display(),
                    "failed to parse settings, using defaults"
                );
            }
        }

        settings
    }

    /// Saves settings to disk, creating the parent directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = SettingsFile {
            sidetone_level: self.sidetone_level,
            led_on: self.led_on,
            inactive_time_min: self.inactive_time_min,
        };

        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.file_path, &json)?;

        tracing::debug!("indicator settings saved");
        Ok(())
    }
}

fn settings_file_path() -> PathBuf {
    config_base_dir().join("headsup").join("settings.json")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(dir.path().join("settings.json"));
        assert_eq!(settings.sidetone_level, None);
        assert_eq!(settings.led_on, None);
        assert_eq!(settings.inactive_time_min, None);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::load_from(path.clone());
        settings.sidetone_level = Some(64);
        settings.led_on = Some(false);
        settings.inactive_time_min = Some(30);
        settings.save().unwrap();

        let reloaded = Settings::load_from(path);
        assert_eq!(reloaded.sidetone_level, Some(64));
        assert_eq!(reloaded.led_on, Some(false));
        assert_eq!(reloaded.inactive_time_min, Some(30));
    }

    #[test]
    fn unset_fields_stay_unset_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::load_from(path.clone());
        settings.sidetone_level = Some(96);
        settings.save().unwrap();

        // Unset preferences are not serialized at all.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("sidetoneLevel"));
        assert!(!raw.contains("ledOn"));

        let reloaded = Settings::load_from(path);
        assert_eq!(reloaded.sidetone_level, Some(96));
        assert_eq!(reloaded.led_on, None);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_from(path);
        assert_eq!(settings.sidetone_level, None);
    }

    #[test]
    fn partial_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"ledOn": true}"#).unwrap();

        let settings = Settings::load_from(path);
        assert_eq!(settings.led_on, Some(true));
        assert_eq!(settings.sidetone_level, None);
    }
}
