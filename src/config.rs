//! Configuration management for the WeCom alert channel
//!
//! Two shapes of configuration exist. `WeComSettings` holds the raw,
//! string-valued settings as they arrive from a TOML file, the environment,
//! the command line or the plugin parameter map. `WeComConfig` is the typed,
//! validated form a sender is built from. The application-level `Config`
//! uses the `figment` crate to layer defaults, a TOML file, environment
//! variables and CLI arguments.

use crate::cli::Cli;
use crate::message::MessageType;
use crate::params::{NAME_AT_MOBILES, NAME_AT_USER_IDS, NAME_MSG_TYPE, NAME_WEB_HOOK};
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "wecom-alert.toml";

/// Errors raised while turning raw settings into a `WeComConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WeCom webhook url is required")]
    MissingWebhookUrl,
}

/// The main configuration struct for the command-line application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Settings for the WeCom channel.
    pub wecom: WeComSettings,
}

/// Raw WeCom channel settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WeComSettings {
    /// The group robot webhook URL.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// `text` or `markdown`; blank means `text`.
    #[serde(default)]
    pub msg_type: Option<String>,
    /// Comma-delimited mobile numbers to mention (text messages only).
    #[serde(default)]
    pub at_mobiles: Option<String>,
    /// Comma-delimited user ids to mention.
    #[serde(default)]
    pub at_user_ids: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for WeComSettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            msg_type: None,
            at_mobiles: None,
            at_user_ids: None,
            timeout_seconds: 10,
        }
    }
}

impl WeComSettings {
    /// Validates the settings and builds the typed channel config.
    pub fn to_wecom_config(&self) -> Result<WeComConfig, ConfigError> {
        let webhook_url = self
            .webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingWebhookUrl)?;

        Ok(WeComConfig {
            webhook_url: webhook_url.to_string(),
            msg_type: MessageType::resolve(self.msg_type.as_deref()),
            at_mobiles: split_list(self.at_mobiles.as_deref()),
            at_user_ids: split_list(self.at_user_ids.as_deref()),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Typed, immutable configuration of a WeCom sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeComConfig {
    pub webhook_url: String,
    pub msg_type: MessageType,
    pub at_mobiles: Vec<String>,
    pub at_user_ids: Vec<String>,
}

impl WeComConfig {
    /// Creates a text-message config with no mentions.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            msg_type: MessageType::Text,
            at_mobiles: Vec::new(),
            at_user_ids: Vec::new(),
        }
    }

    pub fn with_msg_type(mut self, msg_type: MessageType) -> Self {
        self.msg_type = msg_type;
        self
    }

    pub fn with_at_mobiles(mut self, mobiles: Vec<String>) -> Self {
        self.at_mobiles = mobiles;
        self
    }

    pub fn with_at_user_ids(mut self, user_ids: Vec<String>) -> Self {
        self.at_user_ids = user_ids;
        self
    }

    /// Builds a config from an alert-plugin parameter map.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        WeComSettings {
            webhook_url: params.get(NAME_WEB_HOOK).cloned(),
            msg_type: params.get(NAME_MSG_TYPE).cloned(),
            at_mobiles: params.get(NAME_AT_MOBILES).cloned(),
            at_user_ids: params.get(NAME_AT_USER_IDS).cloned(),
            ..WeComSettings::default()
        }
        .to_wecom_config()
    }
}

/// Splits a comma-delimited list, trimming entries and dropping empty ones.
///
/// Unlike a raw split on `,`, `"a, ,b"` yields `["a", "b"]` rather than
/// `["a", " ", "b"]`.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are layered in order: built-in defaults, the TOML file, the
    /// environment (`WECOM_ALERT_` prefix, `__` separates nested keys) and
    /// finally the command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("WECOM_ALERT_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            wecom: WeComSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_params_full() {
        let config = WeComConfig::from_params(&params(&[
            (NAME_WEB_HOOK, "https://example.com/hook"),
            (NAME_MSG_TYPE, "markdown"),
            (NAME_AT_MOBILES, "13800000000,13900000000"),
            (NAME_AT_USER_IDS, "alice, bob"),
        ]))
        .unwrap();

        assert_eq!(config.webhook_url, "https://example.com/hook");
        assert_eq!(config.msg_type, MessageType::Markdown);
        assert_eq!(config.at_mobiles, vec!["13800000000", "13900000000"]);
        assert_eq!(config.at_user_ids, vec!["alice", "bob"]);
    }

    #[test]
    fn test_from_params_requires_webhook() {
        assert_eq!(
            WeComConfig::from_params(&params(&[(NAME_MSG_TYPE, "text")])),
            Err(ConfigError::MissingWebhookUrl)
        );
        assert_eq!(
            WeComConfig::from_params(&params(&[(NAME_WEB_HOOK, "  ")])),
            Err(ConfigError::MissingWebhookUrl)
        );
    }

    #[test]
    fn test_blank_msg_type_defaults_to_text() {
        let config = WeComConfig::from_params(&params(&[
            (NAME_WEB_HOOK, "url"),
            (NAME_MSG_TYPE, ""),
        ]))
        .unwrap();
        assert_eq!(config.msg_type, MessageType::Text);
        assert!(config.at_mobiles.is_empty());
        assert!(config.at_user_ids.is_empty());
    }

    #[test]
    fn test_split_list() {
        assert!(split_list(None).is_empty());
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(Some(" , ")).is_empty());
        assert_eq!(split_list(Some("a,b,,c,")), vec!["a", "b", "c"]);
        assert_eq!(split_list(Some(" x ")), vec!["x"]);
        assert_eq!(split_list(Some("a, ,b")), vec!["a", "b"]);
    }
}
