use std::fs;

use genai_integration::{GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub max_prompt_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.into(),
            max_prompt_bytes: 64 * 1024,
        }
    }
}

impl Settings {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            endpoint: self.gemini_endpoint.clone(),
        }
    }
}

/// Defaults, then `server.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let table = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            warn!(file = SETTINGS_FILE, %err, "ignoring unreadable settings file");
            return;
        }
    };
    let get = |key: &str| -> Option<String> {
        match table.get(key)? {
            toml::Value::String(v) => Some(v.clone()),
            toml::Value::Integer(v) => Some(v.to_string()),
            _ => None,
        }
    };

    if let Some(v) = non_empty(get("bind_addr")) {
        settings.server_bind = v;
    }
    if let Some(v) = non_empty(get("gemini_model")) {
        settings.gemini_model = v;
    }
    if let Some(v) = non_empty(get("gemini_endpoint")) {
        settings.gemini_endpoint = v;
    }
    if let Some(v) = get("max_prompt_bytes").and_then(|v| v.parse().ok()) {
        settings.max_prompt_bytes = v;
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| non_empty(env(key));

    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("GEMINI_API_KEY") {
        settings.gemini_api_key = Some(v);
    }
    if let Some(v) = var("APP__GEMINI_API_KEY") {
        settings.gemini_api_key = Some(v);
    }

    if let Some(v) = var("GEMINI_MODEL") {
        settings.gemini_model = v;
    }
    if let Some(v) = var("APP__GEMINI_MODEL") {
        settings.gemini_model = v;
    }

    if let Some(v) = var("GEMINI_ENDPOINT") {
        settings.gemini_endpoint = v;
    }
    if let Some(v) = var("APP__GEMINI_ENDPOINT") {
        settings.gemini_endpoint = v;
    }

    if let Some(v) = var("APP__MAX_PROMPT_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_prompt_bytes = parsed;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
