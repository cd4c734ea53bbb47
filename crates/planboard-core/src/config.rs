//! TOML-based application configuration.
//!
//! Stores CLI-level preferences: the default plan file, the calendar year,
//! and the capacity lookahead used by alert generation.
//!
//! Configuration is stored at `~/.config/planboard/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Plan file configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSection {
    /// Default plan file consulted when commands get no explicit path.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Calendar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarSection {
    /// Year for week-grid commands; defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Alert generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsSection {
    #[serde(default = "default_capacity_lookahead_weeks")]
    pub capacity_lookahead_weeks: u32,
}

fn default_capacity_lookahead_weeks() -> u32 {
    12
}

impl Default for AlertsSection {
    fn default() -> Self {
        Self {
            capacity_lookahead_weeks: default_capacity_lookahead_weeks(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/planboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanSection,
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub alerts: AlertsSection,
}

/// Returns `~/.config/planboard[-dev]/` based on PLANBOARD_ENV.
///
/// Set PLANBOARD_ENV=dev to use a separate development directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PLANBOARD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("planboard-dev")
    } else {
        base_dir.join("planboard")
    };

    std::fs::create_dir_all(&dir).map_err(|err| ConfigError::LoadFailed {
        path: dir.clone(),
        message: err.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first use.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path,
                message: err.to_string(),
            }),
            Err(_) => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = Self::value_by_path(&json, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the existing value's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// [`set`](Self::set) without persisting.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Self::set_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(())
    }

    fn value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let object = current.as_object_mut().ok_or_else(unknown)?;
                let existing = object.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as boolean"),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    // Unset optional keys carry no type; infer from the value.
                    serde_json::Value::Null => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(b) = value.parse::<bool>() {
                            serde_json::Value::Bool(b)
                        } else {
                            serde_json::Value::String(value.to_string())
                        }
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };

                object.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }
}
