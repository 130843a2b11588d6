use crate::autosave::DEFAULT_INTERVAL_SECS;
use crate::error::{NotepadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: &[&str] = &["auto-save", "autosave-interval", "export-dir"];

/// Configuration for the notepad, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotepadConfig {
    /// Save after every edit, clear and on the periodic timer
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,

    /// Seconds between periodic autosaves
    #[serde(default = "default_interval")]
    pub autosave_interval_secs: u64,

    /// Where exports are written when no output path is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_auto_save() -> bool {
    true
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            auto_save: default_auto_save(),
            autosave_interval_secs: default_interval(),
            export_dir: None,
        }
    }
}

impl NotepadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotepadError::Io)?;
        let config: NotepadConfig =
            serde_json::from_str(&content).map_err(NotepadError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotepadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotepadError::Serialization)?;
        fs::write(config_path, content).map_err(NotepadError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "auto-save" => Some(on_off(self.auto_save).to_string()),
            "autosave-interval" => Some(self.autosave_interval_secs.to_string()),
            "export-dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "auto-save" => {
                self.auto_save = parse_on_off(value)
                    .ok_or_else(|| format!("auto-save expects on/off, got {}", value))?;
            }
            "autosave-interval" => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("autosave-interval expects seconds, got {}", value))?;
                if secs == 0 {
                    return Err("autosave-interval must be at least 1 second".to_string());
                }
                self.autosave_interval_secs = secs;
            }
            "export-dir" => {
                let trimmed = value.trim();
                self.export_dir = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

pub fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn parse_on_off(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NotepadConfig::default();
        assert!(config.auto_save);
        assert_eq!(config.autosave_interval_secs, 30);
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotepadConfig::load(dir.path()).unwrap();
        assert_eq!(config, NotepadConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NotepadConfig::default();
        config.set("auto-save", "off").unwrap();
        config.set("autosave-interval", "90").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = NotepadConfig::load(dir.path()).unwrap();
        assert!(!loaded.auto_save);
        assert_eq!(loaded.autosave_interval_secs, 90);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"auto_save": false}"#).unwrap();
        let loaded = NotepadConfig::load(dir.path()).unwrap();
        assert!(!loaded.auto_save);
        assert_eq!(loaded.autosave_interval_secs, 30);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = NotepadConfig::default();
        assert!(config.set("auto-save", "maybe").is_err());
        assert!(config.set("autosave-interval", "0").is_err());
        assert!(config.set("autosave-interval", "soon").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, NotepadConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let mut config = NotepadConfig::default();
        config.set("export-dir", "/tmp/exports").unwrap();
        assert_eq!(config.get("auto-save").as_deref(), Some("on"));
        assert_eq!(config.get("export-dir").as_deref(), Some("/tmp/exports"));
        assert_eq!(config.get("nope"), None);
    }
}
