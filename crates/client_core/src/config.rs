use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

const SETTINGS_FILE: &str = "post_machine.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/posts".into(),
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self) -> Result<Url, SettingsError> {
        let url =
            Url::parse(self.endpoint.trim()).map_err(|source| SettingsError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(SettingsError::UnsupportedScheme(url)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            if let Some(v) = file_cfg.get("endpoint").and_then(toml::Value::as_str) {
                settings.endpoint = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("request_timeout_secs")
                .and_then(toml::Value::as_integer)
                .and_then(|v| u64::try_from(v).ok())
            {
                settings.request_timeout_secs = v;
            }
        }
    }

    if let Some(v) = env("POSTS_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = env("APP__POSTS_ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
