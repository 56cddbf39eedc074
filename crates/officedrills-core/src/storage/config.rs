//! TOML-based user settings.
//!
//! Stores the break interval, the category the selector draws from, sound and
//! notification preferences, auto-start, and how many recent exercises are
//! held back by the cooldown filter.
//!
//! Settings are stored at `~/.config/officedrills/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::exercise::CategoryFilter;

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Minutes between breaks.
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub selected_category: CategoryFilter,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// 0.0 ..= 1.0
    #[serde(default = "default_volume")]
    pub sound_volume: f64,
    #[serde(default)]
    pub auto_start: bool,
    /// How many of the most recently completed exercises to hold back.
    #[serde(default = "default_cooldown")]
    pub cooldown_exercises: u32,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_interval() -> u32 {
    30
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f64 {
    0.5
}
fn default_cooldown() -> u32 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            selected_category: CategoryFilter::All,
            sound_enabled: true,
            sound_volume: default_volume(),
            auto_start: false,
            cooldown_exercises: default_cooldown(),
            notifications_enabled: true,
        }
    }
}

impl Settings {
    /// Break interval in seconds.
    pub fn interval_secs(&self) -> u64 {
        u64::from(self.interval).saturating_mul(60)
    }

    /// # Errors
    /// Returns an error naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "interval".into(),
                message: "must be at least 1 minute".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.sound_volume) {
            return Err(ConfigError::InvalidValue {
                key: "sound_volume".into(),
                message: format!("{} is outside 0.0..=1.0", self.sound_volume),
            });
        }
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Some(n) = value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                        {
                            serde_json::Value::Number(n)
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location: `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the file with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Same as [`Settings::load`] for an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                settings.validate()?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a setting as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a setting in memory. The new value must parse as the field's
    /// type and pass [`Settings::validate`]; on error `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Category;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
        assert!(toml_str.contains("selected_category = \"All\""));
    }

    #[test]
    fn default_values() {
        let s = Settings::default();
        assert_eq!(s.interval, 30);
        assert_eq!(s.interval_secs(), 1800);
        assert_eq!(s.selected_category, CategoryFilter::All);
        assert_eq!(s.sound_volume, 0.5);
        assert!(!s.auto_start);
        assert_eq!(s.cooldown_exercises, 5);
        assert!(s.notifications_enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Settings = toml::from_str("interval = 45").unwrap();
        assert_eq!(parsed.interval, 45);
        assert_eq!(parsed.cooldown_exercises, 5);
    }

    #[test]
    fn get_returns_strings_for_all_types() {
        let s = Settings::default();
        assert_eq!(s.get("interval").as_deref(), Some("30"));
        assert_eq!(s.get("auto_start").as_deref(), Some("false"));
        assert_eq!(s.get("selected_category").as_deref(), Some("All"));
        assert!(s.get("theme").is_none());
    }

    #[test]
    fn set_updates_typed_fields() {
        let mut s = Settings::default();
        s.set("interval", "45").unwrap();
        s.set("sound_volume", "0.8").unwrap();
        s.set("selected_category", "Full-Body").unwrap();
        s.set("auto_start", "true").unwrap();
        assert_eq!(s.interval, 45);
        assert_eq!(s.sound_volume, 0.8);
        assert_eq!(s.selected_category, CategoryFilter::Only(Category::FullBody));
        assert!(s.auto_start);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut s = Settings::default();
        assert!(matches!(s.set("theme", "dark"), Err(ConfigError::UnknownKey(_))));
        assert!(s.set("auto_start", "yes").is_err());
        assert!(s.set("interval", "0").is_err());
        assert!(s.set("sound_volume", "1.5").is_err());
        assert!(s.set("selected_category", "Elbows").is_err());
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn load_from_creates_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
        assert!(path.exists());

        let mut changed = loaded;
        changed.set("cooldown_exercises", "0").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().cooldown_exercises, 0);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "interval = 0").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
