use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_YOUTUBE_CHANNEL_ID: &str = "UC3Qjm7mwZDQ5jIsxo3tU1MQ";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_blank = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("ALSOKAL_ENV", "development"))?;

    let dashboard_secret = non_blank("DASHBOARD_SECRET");
    if dashboard_secret.is_none() && !env.is_development() {
        return Err(ConfigError::MissingEnvVar("DASHBOARD_SECRET".to_string()));
    }

    let bind_addr = parse_addr("ALSOKAL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ALSOKAL_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("ALSOKAL_DATA_DIR", "./data"));
    let session_max_age_secs = parse_u64("ALSOKAL_SESSION_MAX_AGE_SECS", "604800")?;

    let youtube_api_key = non_blank("YOUTUBE_API_KEY");
    let youtube_channel_id = or_default("YOUTUBE_CHANNEL_ID", DEFAULT_YOUTUBE_CHANNEL_ID);
    let youtube_timeout_secs = parse_u64("ALSOKAL_YOUTUBE_TIMEOUT_SECS", "30")?;
    let youtube_cache_secs = parse_u64("ALSOKAL_YOUTUBE_CACHE_SECS", "3600")?;

    let contact_rate_limit = parse_usize("ALSOKAL_CONTACT_RATE_LIMIT", "10")?;
    if contact_rate_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ALSOKAL_CONTACT_RATE_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        dashboard_secret,
        session_max_age_secs,
        youtube_api_key,
        youtube_channel_id,
        youtube_timeout_secs,
        youtube_cache_secs,
        contact_rate_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ALSOKAL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
