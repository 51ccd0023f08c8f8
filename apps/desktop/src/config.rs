use std::{
    fs,
    path::{Path, PathBuf},
};

use client_core::ClientConfig;
use registration_flow::FlowOptions;
use serde::Deserialize;
use shared::domain::{EventId, EventIdError};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "event_desk.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error(transparent)]
    EventId(#[from] EventIdError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub api_key: String,
    pub access_token: Option<String>,
    pub event_id: i64,
    pub log_filter: String,
    pub unify_unauthorized: bool,
    /// Settings file the values were read from, if any.
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:54321".into(),
            api_key: String::new(),
            access_token: None,
            event_id: 1,
            log_filter: "warn".into(),
            unify_unauthorized: false,
            source: None,
        }
    }
}

/// Keys accepted in the TOML file. Everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    backend_url: Option<String>,
    api_key: Option<String>,
    access_token: Option<String>,
    event_id: Option<i64>,
    log_filter: Option<String>,
    unify_unauthorized: Option<bool>,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub event_id: Option<i64>,
    pub unify_unauthorized: bool,
}

/// Defaults, then the config file, then the process environment.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };
    if let Some(path) = path {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        settings.apply_file(&path, &raw)?;
    }

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("event_desk").join("config.toml");
    user.is_file().then_some(user)
}

impl Settings {
    pub fn apply_file(&mut self, path: &Path, raw: &str) -> Result<(), ConfigError> {
        let file: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(v) = file.backend_url {
            self.backend_url = v;
        }
        if let Some(v) = file.api_key {
            self.api_key = v;
        }
        if let Some(v) = file.access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = file.event_id {
            self.event_id = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file.unify_unauthorized {
            self.unify_unauthorized = v;
        }
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Reads `EVENT_DESK_*` then `APP__*`; the latter wins when both are set.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let var = |name: &str| {
            lookup(&format!("APP__{name}")).or_else(|| lookup(&format!("EVENT_DESK_{name}")))
        };

        if let Some(v) = var("BACKEND_URL") {
            self.backend_url = v;
        }
        if let Some(v) = var("API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = var("ACCESS_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = var("EVENT_ID") {
            self.event_id = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "EVENT_ID",
                value: v.clone(),
            })?;
        }
        if let Some(v) = var("LOG_FILTER") {
            self.log_filter = v;
        }
        if let Some(v) = var("UNIFY_UNAUTHORIZED") {
            self.unify_unauthorized = parse_flag(&v).ok_or(ConfigError::InvalidValue {
                key: "UNIFY_UNAUTHORIZED",
                value: v.clone(),
            })?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.backend_url {
            self.backend_url = v;
        }
        if let Some(v) = overrides.api_key {
            self.api_key = v;
        }
        if let Some(v) = overrides.access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = overrides.event_id {
            self.event_id = v;
        }
        if overrides.unify_unauthorized {
            self.unify_unauthorized = true;
        }
    }

    pub fn validate(&self) -> Result<EventId, ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Missing("backend_url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        Ok(EventId::new(self.event_id)?)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
        }
    }

    pub fn flow_options(&self) -> FlowOptions {
        FlowOptions {
            unify_unauthorized: self.unify_unauthorized,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
