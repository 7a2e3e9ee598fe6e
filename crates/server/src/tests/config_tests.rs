use super::{apply_env_overrides, apply_file_overrides, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_use_flash_model_without_credential() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:3000");
    assert_eq!(settings.gemini_model, "gemini-1.5-flash");
    assert!(settings.gemini_api_key.is_none());
    assert_eq!(settings.max_prompt_bytes, 65536);
}

#[test]
fn file_overrides_accept_strings_and_integers() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:8080"
gemini_model = "gemini-1.5-pro"
max_prompt_bytes = 1024
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.gemini_model, "gemini-1.5-pro");
    assert_eq!(settings.max_prompt_bytes, 1024);
}

#[test]
fn unreadable_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "this is = = not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("GEMINI_API_KEY", "plain"),
            ("APP__GEMINI_API_KEY", "prefixed"),
            ("GEMINI_ENDPOINT", "http://localhost:9999/v1beta"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.gemini_api_key.as_deref(), Some("prefixed"));
    assert_eq!(settings.gemini_endpoint, "http://localhost:9999/v1beta");

    let gemini = settings.gemini_config();
    assert_eq!(gemini.api_key.as_deref(), Some("prefixed"));
    assert_eq!(gemini.model, "gemini-1.5-flash");
}

#[test]
fn blank_env_values_and_bad_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[("GEMINI_API_KEY", "   "), ("APP__MAX_PROMPT_BYTES", "lots")]),
    );
    assert!(settings.gemini_api_key.is_none());
    assert_eq!(settings.max_prompt_bytes, 65536);
}
