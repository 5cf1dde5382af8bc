use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::protocol::Post;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub seed_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            seed_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("seed_path") {
                settings.seed_path = non_empty_path(v);
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("POSTS_SEED") {
        settings.seed_path = non_empty_path(&v);
    }
    if let Some(v) = env("APP__SEED_PATH") {
        settings.seed_path = non_empty_path(&v);
    }

    settings
}

/// Reads a JSON array of posts used to seed the in-memory store.
pub fn load_seed(path: &Path) -> anyhow::Result<Vec<Post>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("seed file '{}' is not a JSON array of posts", path.display()))
}

fn non_empty_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| PathBuf::from(raw))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
