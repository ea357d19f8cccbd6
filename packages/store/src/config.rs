//! # Console configuration: `console.toml`
//!
//! Defines the TOML configuration the web package embeds at build time
//! (filename: [`ConsoleConfig::filename`] = `"console.toml"`). It tells the
//! console where the archive API lives and tunes the few behaviours that are
//! deployment-specific.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api/v1"
//!
//! [notifications]
//! poll_interval_secs = 60   # 0 to disable polling
//! list_limit = 20
//!
//! [intake]
//! ai_available = false      # enables the "AI + Regex" and "AI" detection methods
//!
//! [tables]
//! page_size = 10
//! fetch_limit = 100
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ConsoleConfig`] | Top-level config with builder helpers (`with_base_url`, `with_poll_interval`, `with_ai`) and TOML (de)serialisation. |
//! | [`ApiConfig`] | Base URL of the REST API, no trailing slash. |
//! | [`NotificationConfig`] | Bell polling interval (default **60 seconds**) and list size (default **20**). |
//! | [`IntakeConfig`] | Whether the AI-assisted detection methods are offered. |
//! | [`TableConfig`] | Client-side page size and the `limit` sent when fetching list data. |
//!
//! Every section is `#[serde(default)]`, so a missing or empty file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub tables: TableConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Notification bell configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Polling interval in seconds. 0 disables polling.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u32,
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

fn default_poll_interval() -> u32 {
    60
}

fn default_list_limit() -> u32 {
    20
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            list_limit: default_list_limit(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub ai_available: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_fetch_limit() -> u32 {
    100
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

impl ConsoleConfig {
    /// Builder method to set the API base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the notification polling interval.
    pub fn with_poll_interval(mut self, secs: u32) -> Self {
        self.notifications.poll_interval_secs = secs;
        self
    }

    /// Builder method to toggle AI-assisted detection.
    pub fn with_ai(mut self, available: bool) -> Self {
        self.intake.ai_available = available;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Whether the notification bell should poll at all.
    pub fn polling_enabled(&self) -> bool {
        self.notifications.poll_interval_secs > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.notifications.poll_interval_secs, 60);
        assert_eq!(config.notifications.list_limit, 20);
        assert!(!config.intake.ai_available);
        assert_eq!(config.tables.page_size, 10);
        assert_eq!(config.tables.fetch_limit, 100);
    }

    #[test]
    fn test_partial_sections() {
        let toml_str = r#"
[api]
base_url = "https://arsip.example.go.id/api/v1/"

[notifications]
poll_interval_secs = 0
"#;
        let config = ConsoleConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://arsip.example.go.id/api/v1");
        assert!(!config.polling_enabled());
        assert_eq!(config.notifications.list_limit, 20);
        assert_eq!(config.tables, TableConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ConsoleConfig::default()
            .with_base_url("http://10.0.0.5:8000/api/v1")
            .with_poll_interval(30)
            .with_ai(true);
        let toml_str = config.to_toml().unwrap();
        let parsed = ConsoleConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
        assert!(parsed.intake.ai_available);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(ConsoleConfig::from_toml("[api\nbase_url = 3").is_err());
    }
}
