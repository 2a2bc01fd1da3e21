use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Stores user-configurable CLI preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    #[serde(default = "Config::default_period_type_value")]
    pub default_period_type: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_near_limit_alerts")]
    pub near_limit_alerts: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Budget snapshot loaded automatically when the shell starts.
    pub last_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-CR".into(),
            currency_symbol: "₡".into(),
            default_period_type: Self::default_period_type_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            near_limit_alerts: Self::default_near_limit_alerts(),
            last_snapshot: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "locale",
        "currency_symbol",
        "default_period_type",
        "ui_color_enabled",
        "near_limit_alerts",
    ];

    pub fn default_period_type_value() -> String {
        "monthly".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_near_limit_alerts() -> bool {
        true
    }

    /// Updates a single preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, trimmed)?,
            "currency_symbol" => self.currency_symbol = non_empty(key, trimmed)?,
            "default_period_type" => {
                self.default_period_type = non_empty(key, trimmed)?.to_ascii_lowercase()
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(key, trimmed)?,
            "near_limit_alerts" => self.near_limit_alerts = parse_flag(key, trimmed)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Current value of a preference rendered as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency_symbol" => self.currency_symbol.clone(),
            "default_period_type" => self.default_period_type.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "near_limit_alerts" => self.near_limit_alerts.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        });
    }
    Ok(value.to_string())
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }),
    }
}
