use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    /// Shared dashboard password. `None` only in development.
    pub dashboard_secret: Option<String>,
    pub session_max_age_secs: u64,
    pub youtube_api_key: Option<String>,
    pub youtube_channel_id: String,
    pub youtube_timeout_secs: u64,
    pub youtube_cache_secs: u64,
    /// Contact-form submissions accepted per minute.
    pub contact_rate_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field(
                "dashboard_secret",
                &self.dashboard_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("session_max_age_secs", &self.session_max_age_secs)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_channel_id", &self.youtube_channel_id)
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("youtube_cache_secs", &self.youtube_cache_secs)
            .field("contact_rate_limit", &self.contact_rate_limit)
            .finish()
    }
}
