//! Configuration types for the frontdesk client.
//!
//! Configuration lives in `.frontdesk/config.json`. Every field has a
//! default, so a missing or partial file is fine. Environment variables
//! override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`Config::api_base_url`].
pub const ENV_API_URL: &str = "FRONTDESK_API_URL";

/// Environment variable overriding [`Config::request_timeout_seconds`].
pub const ENV_TIMEOUT_SECONDS: &str = "FRONTDESK_TIMEOUT_SECONDS";

/// Main configuration for frontdesk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the chat API (`/chat` is appended).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds; 0 waits forever.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Name sent along with each message, if set.
    #[serde(default)]
    pub user_name: Option<String>,

    /// Email sent along with each message, if set.
    #[serde(default)]
    pub user_email: Option<String>,

    /// Fixed texts inserted into the log locally.
    #[serde(default)]
    pub notices: Notices,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000/api".into()
}

fn default_request_timeout_seconds() -> u64 {
    60
}

/// Assistant-authored texts that never come from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notices {
    /// Seeds a fresh session.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Replaces the log after a reset.
    #[serde(default = "default_cleared")]
    pub cleared: String,

    /// Appended when a send fails.
    #[serde(default = "default_failure")]
    pub failure: String,

    /// Appended when a send exceeds the request timeout.
    #[serde(default = "default_timeout_notice")]
    pub timeout: String,
}

fn default_greeting() -> String {
    "Hello! I'm your AI Receptionist. How can I assist you today?".into()
}

fn default_cleared() -> String {
    "Conversation cleared. How can I help you now?".into()
}

fn default_failure() -> String {
    "I'm sorry, I encountered an error connecting to the server. Please try again later.".into()
}

fn default_timeout_notice() -> String {
    "I'm sorry, the server took too long to respond. Please try again.".into()
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            cleared: default_cleared(),
            failure: default_failure(),
            timeout: default_timeout_notice(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECONDS) {
            self.request_timeout_seconds =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECONDS,
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url",
                value: self.api_base_url.clone(),
            });
        }
        Ok(())
    }

    /// The request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.request_timeout_seconds))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            user_name: None,
            user_email: None,
            notices: Notices::default(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(60)));
        assert!(config.notices.greeting.starts_with("Hello!"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api_base_url":"https://desk.example.com/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://desk.example.com/api");
        assert_eq!(config.notices, Notices::default());
        assert_eq!(config.request_timeout_seconds, 60);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".frontdesk").join("config.json");

        let mut config = Config::default();
        config.user_name = Some("Ada".into());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, " http://10.0.0.5:9000/api "),
            (ENV_TIMEOUT_SECONDS, "0"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000/api");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == ENV_TIMEOUT_SECONDS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config {
            api_base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
