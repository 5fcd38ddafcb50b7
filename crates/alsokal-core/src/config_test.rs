use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a production-shaped map with every required var populated.
fn production_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ALSOKAL_ENV", "production");
    m.insert("DASHBOARD_SECRET", "hunter2");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ALSOKAL_ENV"));
}

#[test]
fn build_app_config_development_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("development needs no vars");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("./data"));
    assert!(cfg.dashboard_secret.is_none());
    assert_eq!(cfg.session_max_age_secs, 604_800);
    assert!(cfg.youtube_api_key.is_none());
    assert_eq!(cfg.youtube_channel_id, "UC3Qjm7mwZDQ5jIsxo3tU1MQ");
    assert_eq!(cfg.youtube_timeout_secs, 30);
    assert_eq!(cfg.youtube_cache_secs, 3600);
    assert_eq!(cfg.contact_rate_limit, 10);
}

#[test]
fn build_app_config_production_requires_dashboard_secret() {
    let mut map = production_env();
    map.remove("DASHBOARD_SECRET");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DASHBOARD_SECRET"),
        "expected MissingEnvVar(DASHBOARD_SECRET), got: {result:?}"
    );
}

#[test]
fn build_app_config_blank_secret_counts_as_missing() {
    let mut map = production_env();
    map.insert("DASHBOARD_SECRET", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_production_succeeds_with_secret() {
    let map = production_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("valid production config");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.dashboard_secret.as_deref(), Some("hunter2"));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = production_env();
    map.insert("ALSOKAL_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALSOKAL_BIND_ADDR"),
        "expected InvalidEnvVar(ALSOKAL_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_youtube_overrides() {
    let mut map = production_env();
    map.insert("YOUTUBE_API_KEY", "yt-key");
    map.insert("YOUTUBE_CHANNEL_ID", "UCother");
    map.insert("ALSOKAL_YOUTUBE_CACHE_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.youtube_api_key.as_deref(), Some("yt-key"));
    assert_eq!(cfg.youtube_channel_id, "UCother");
    assert_eq!(cfg.youtube_cache_secs, 60);
}

#[test]
fn build_app_config_youtube_timeout_invalid() {
    let mut map = production_env();
    map.insert("ALSOKAL_YOUTUBE_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALSOKAL_YOUTUBE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ALSOKAL_YOUTUBE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_session_max_age_override() {
    let mut map = production_env();
    map.insert("ALSOKAL_SESSION_MAX_AGE_SECS", "3600");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.session_max_age_secs, 3600);
}

#[test]
fn build_app_config_contact_rate_limit_zero_rejected() {
    let mut map = production_env();
    map.insert("ALSOKAL_CONTACT_RATE_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALSOKAL_CONTACT_RATE_LIMIT"),
        "expected InvalidEnvVar(ALSOKAL_CONTACT_RATE_LIMIT), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = production_env();
    map.insert("YOUTUBE_API_KEY", "yt-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("yt-key"));
    assert!(debug.contains("[redacted]"));
}
