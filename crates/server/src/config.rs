use std::fs;

use dataset::DEFAULT_DATASET_URL;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub dataset_source: String,
    pub max_update_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8050".into(),
            dataset_source: DEFAULT_DATASET_URL.into(),
            max_update_body_bytes: 16 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    dataset_source: Option<String>,
    max_update_body_bytes: Option<usize>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings.dataset_source = normalize_dataset_source(&settings.dataset_source);
    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.dataset_source {
        settings.dataset_source = v;
    }
    if let Some(v) = file_cfg.max_update_body_bytes {
        settings.max_update_body_bytes = v;
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("DASHBOARD_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("DASHBOARD_DATASET") {
        settings.dataset_source = v;
    }
    if let Some(v) = lookup("APP__DATASET_SOURCE") {
        settings.dataset_source = v;
    }

    if let Some(v) = lookup("APP__MAX_UPDATE_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_update_body_bytes = parsed;
        }
    }
}

pub(crate) fn normalize_dataset_source(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().dataset_source;
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
