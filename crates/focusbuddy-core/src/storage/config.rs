//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Focus and break durations
//! - XP award per focus session and the streak milestone interval
//! - An optional override for where the progress record lives
//!
//! Configuration is stored at `~/.config/focusbuddy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{data_dir, RecordStore, RECORD_FILE_NAME};
use crate::error::ConfigError;
use crate::progress::{LedgerRules, XP_PER_LEVEL};
use crate::timer::{SessionDurations, DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS};

/// Countdown lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,
}

/// Progress accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_xp_per_session")]
    pub xp_per_session: u64,
    #[serde(default = "default_milestone_interval")]
    pub milestone_interval: u32,
}

/// Where the progress record is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Absolute path to the record file. Defaults to
    /// `<data dir>/focus_data.json` when unset.
    #[serde(default)]
    pub record_path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusbuddy/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_focus_secs() -> u64 {
    DEFAULT_FOCUS_SECS
}
fn default_break_secs() -> u64 {
    DEFAULT_BREAK_SECS
}
fn default_xp_per_session() -> u64 {
    25
}
fn default_milestone_interval() -> u32 {
    5
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            break_secs: default_break_secs(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            xp_per_session: default_xp_per_session(),
            milestone_interval: default_milestone_interval(),
        }
    }
}

impl Config {
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let unknown = || ConfigError::UnknownKey(key.to_string());

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
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    // Unset optionals show up as null; they hold paths.
                    serde_json::Value::Null | serde_json::Value::String(_) => {
                        if value.is_empty() {
                            serde_json::Value::Null
                        } else {
                            serde_json::Value::String(value.into())
                        }
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, or return (and write out) the default when no config
    /// file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid values, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = self.to_toml()?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Render as the TOML document that `save` writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    ///
    /// The XP award is capped at one level band so that a single completion
    /// can never cross more than one level threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| {
            Err(ConfigError::InvalidValue {
                key: key.into(),
                message: message.into(),
            })
        };
        if self.timer.focus_secs == 0 {
            return invalid("timer.focus_secs", "must be greater than zero");
        }
        if self.timer.break_secs == 0 {
            return invalid("timer.break_secs", "must be greater than zero");
        }
        if self.progress.xp_per_session == 0 || self.progress.xp_per_session > XP_PER_LEVEL {
            return invalid("progress.xp_per_session", "must be between 1 and 100");
        }
        if self.progress.milestone_interval == 0 {
            return invalid("progress.milestone_interval", "must be greater than zero");
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Apply a value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed or
    /// validated, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn durations(&self) -> SessionDurations {
        SessionDurations::new(self.timer.focus_secs, self.timer.break_secs)
    }

    pub fn ledger_rules(&self) -> LedgerRules {
        LedgerRules {
            xp_per_session: self.progress.xp_per_session,
            milestone_interval: self.progress.milestone_interval,
        }
    }

    /// The record store this config points at.
    ///
    /// # Errors
    ///
    /// Returns an error if no record path is configured and the default data
    /// directory cannot be created.
    pub fn record_store(&self) -> Result<RecordStore, crate::error::StorageError> {
        match &self.storage.record_path {
            Some(path) => Ok(RecordStore::new(path)),
            None => Ok(RecordStore::new(data_dir()?.join(RECORD_FILE_NAME))),
        }
    }
}
