use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use alsokal_core::AppConfig;
use alsokal_youtube::{ChannelReport, YoutubeClient, YoutubeError};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension,
};
use tokio::sync::Mutex;

use crate::middleware::RequestId;

use super::{respond, ApiError, AppState};

struct CachedReport {
    fetched_at: Instant,
    report: Arc<ChannelReport>,
}

/// YouTube client plus the last fetched channel report.
#[derive(Clone)]
pub struct YoutubeState {
    client: Option<YoutubeClient>,
    channel_id: Arc<str>,
    ttl: Duration,
    cache: Arc<Mutex<Option<CachedReport>>>,
}

impl YoutubeState {
    #[must_use]
    pub fn new(client: Option<YoutubeClient>, channel_id: &str, ttl: Duration) -> Self {
        Self {
            client,
            channel_id: Arc::from(channel_id),
            ttl,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Builds the client when `YOUTUBE_API_KEY` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = match config.youtube_api_key.as_deref() {
            Some(key) => Some(YoutubeClient::new(key, config.youtube_timeout_secs)?),
            None => {
                tracing::warn!("YOUTUBE_API_KEY not set; YouTube endpoint disabled");
                None
            }
        };
        Ok(Self::new(
            client,
            &config.youtube_channel_id,
            Duration::from_secs(config.youtube_cache_secs),
        ))
    }

    /// Cached report while fresh, otherwise a new fetch. The lock is held for
    /// the whole fetch; concurrent callers wait for its result.
    async fn report(&self, client: &YoutubeClient) -> Result<Arc<ChannelReport>, YoutubeError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.report));
            }
        }

        let report = Arc::new(client.fetch_report(&self.channel_id).await?);
        *cache = Some(CachedReport {
            fetched_at: Instant::now(),
            report: Arc::clone(&report),
        });
        Ok(report)
    }
}

pub(super) async fn get_youtube(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let youtube = &state.youtube;
    let Some(client) = youtube.client.as_ref() else {
        return ApiError::new(req_id.0, "not_configured", "YouTube API key not configured")
            .into_response();
    };

    match youtube.report(client).await {
        Ok(report) => respond(req_id, report.as_ref()),
        Err(YoutubeError::ChannelNotFound(id)) => {
            ApiError::new(req_id.0, "not_found", format!("channel {id} not found"))
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, channel_id = %youtube.channel_id, "YouTube fetch failed");
            ApiError::new(req_id.0, "upstream_error", "failed to fetch YouTube data")
                .into_response()
        }
    }
}
