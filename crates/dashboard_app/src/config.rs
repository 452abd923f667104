use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use dashboard_client::{
    ApiSettings, DEFAULT_BASE_URL, DEFAULT_MAX_PREVIEW_BYTES, DEFAULT_MAX_UPLOAD_BYTES,
};
use log::LevelFilter;
use serde::Deserialize;

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";

const ENV_BASE_URL: &str = "DASHBOARD_BASE_URL";
const ENV_TOKEN: &str = "DASHBOARD_TOKEN";
const ENV_USERNAME: &str = "DASHBOARD_USERNAME";
const ENV_PASSWORD: &str = "DASHBOARD_PASSWORD";
const ENV_LOG_LEVEL: &str = "DASHBOARD_LOG_LEVEL";

/// Settings read from `dashboard.ron`, then the environment, then CLI flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: u64,
    pub max_preview_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            username: None,
            password: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
            log_level: "info".to_string(),
            log_destination: LogDestination::Terminal,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `./dashboard.ron` when no path is given.
    /// Only the implicit default file may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let mut config = match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound && !required => Self::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {}", path.display()))
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|err| anyhow!("{err}"))
    }

    /// Override fields from environment variables; `lookup` is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
    }

    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        token: Option<String>,
        log_destination: Option<LogDestination>,
    ) {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(destination) = log_destination {
            self.log_destination = destination;
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("invalid log level {:?}", self.log_level))
    }

    /// Credentials to log in with, when no token is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.token.is_some() {
            return None;
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }

    /// How long the shell waits for outstanding effects before giving up.
    pub fn effect_wait(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            bearer_token: self.token.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_upload_bytes: self.max_upload_bytes,
            max_preview_bytes: self.max_preview_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use log::LevelFilter;
    use pretty_assertions::assert_eq;

    use super::AppConfig;
    use crate::logging::LogDestination;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"(
                base_url: "https://dash.example.com/api/",
                token: Some("abc"),
                log_destination: Both,
            )"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://dash.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_upload_bytes, AppConfig::default().max_upload_bytes);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::parse("(base_url: 42)").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(file, r#"(request_timeout_secs: 5, log_level: "debug")"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_settings().request_timeout.as_secs(), 5);
    }

    #[test]
    fn environment_overrides_file_and_flags_override_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DASHBOARD_BASE_URL", "http://env.example.com/api/"),
            ("DASHBOARD_TOKEN", "env-token"),
            ("DASHBOARD_LOG_LEVEL", "debug"),
            ("DASHBOARD_USERNAME", ""),
        ]);
        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://env.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("env-token"));
        assert_eq!(config.username, None);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);

        config.apply_overrides(Some("http://flag.example.com/api/".into()), None, None);
        assert_eq!(config.base_url, "http://flag.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn credentials_only_used_without_token() {
        let mut config = AppConfig {
            username: Some("alice".into()),
            password: Some("secret".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.credentials(), Some(("alice", "secret")));

        config.token = Some("abc".into());
        assert_eq!(config.credentials(), None);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert!(config.level_filter().is_err());
    }
}
