//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API-key handling, error-envelope detection, and typed
//! response deserialization. There are no retries: a failed call surfaces
//! immediately as a [`YoutubeError`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::summary::{build_report, ChannelReport};
use crate::types::{ChannelInfo, ChannelItem, ListResponse, SearchItem, Video, VideoItem};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Recent uploads pulled for the report.
const RECENT_SEARCH_RESULTS: u32 = 50;

/// Most-viewed uploads pulled for the report.
const TOP_SEARCH_RESULTS: u32 = 10;

/// Result ordering for the `search` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    Date,
    ViewCount,
}

impl SearchOrder {
    fn as_str(self) -> &'static str {
        match self {
            SearchOrder::Date => "date",
            SearchOrder::ViewCount => "viewCount",
        }
    }
}

/// Client for the YouTube Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("alsokal/0.1 (creator-dashboard)")
            .build()?;

        // Exactly one trailing slash, so `join` appends the endpoint instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Channel title, description, and lifetime statistics.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ChannelNotFound`] if the lookup returns no items.
    /// - [`YoutubeError::ApiError`] on a non-2xx status or error envelope.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body has an unexpected shape.
    pub async fn get_channel(&self, channel_id: &str) -> Result<ChannelInfo, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[("part", "statistics,snippet"), ("id", channel_id)],
        )?;
        let list: ListResponse<ChannelItem> =
            self.get_list(&url, &format!("channels(id={channel_id})")).await?;

        list.items
            .into_iter()
            .next()
            .map(ChannelInfo::from)
            .ok_or_else(|| YoutubeError::ChannelNotFound(channel_id.to_owned()))
    }

    /// Video ids from the channel's uploads in the given order.
    ///
    /// # Errors
    ///
    /// See [`YoutubeClient::get_channel`].
    pub async fn search_video_ids(
        &self,
        channel_id: &str,
        order: SearchOrder,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let max = max_results.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("order", order.as_str()),
                ("maxResults", &max),
                ("type", "video"),
            ],
        )?;
        let list: ListResponse<SearchItem> = self
            .get_list(&url, &format!("search(order={})", order.as_str()))
            .await?;

        Ok(list
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Full details for the given video ids, in API response order. An empty
    /// id list makes no request.
    ///
    /// # Errors
    ///
    /// See [`YoutubeClient::get_channel`].
    pub async fn get_videos(&self, ids: &[String]) -> Result<Vec<Video>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet,contentDetails"), ("id", &joined)],
        )?;
        let list: ListResponse<VideoItem> = self.get_list(&url, "videos").await?;
        Ok(list.items.into_iter().map(Video::from).collect())
    }

    /// Channel info, recent uploads, and most-viewed uploads, aggregated.
    ///
    /// # Errors
    ///
    /// Propagates the first failing call; see [`YoutubeClient::get_channel`].
    pub async fn fetch_report(&self, channel_id: &str) -> Result<ChannelReport, YoutubeError> {
        let channel = self.get_channel(channel_id).await?;

        let recent_ids = self
            .search_video_ids(channel_id, SearchOrder::Date, RECENT_SEARCH_RESULTS)
            .await?;
        let recent = self.get_videos(&recent_ids).await?;

        let top_ids = self
            .search_video_ids(channel_id, SearchOrder::ViewCount, TOP_SEARCH_RESULTS)
            .await?;
        let top = self.get_videos(&top_ids).await?;

        tracing::info!(
            channel = %channel.title,
            recent = recent.len(),
            top = top.len(),
            "fetched YouTube channel report"
        );

        Ok(build_report(channel, recent, top))
    }

    /// Endpoint URL with the API key and percent-encoded parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::ApiError(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<ListResponse<T>, YoutubeError> {
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;
        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends a GET request and parses the body as JSON. A non-2xx status
    /// becomes [`YoutubeError::ApiError`], carrying the envelope message when
    /// the body has one.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| Self::error_message(&v))
                .unwrap_or_else(|| "no error message".to_string());
            return Err(YoutubeError::ApiError(format!("HTTP {status}: {message}")));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: endpoint_name(url),
            source: e,
        })
    }

    fn error_message(body: &serde_json::Value) -> Option<String> {
        let error = body.get("error")?;
        Some(
            error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )
    }

    /// Checks for a top-level `"error"` object in an otherwise 2xx body.
    fn check_api_error(body: &serde_json::Value) -> Result<(), YoutubeError> {
        match Self::error_message(body) {
            Some(msg) => Err(YoutubeError::ApiError(msg)),
            None => Ok(()),
        }
    }
}

/// Last path segment, used as deserialization context so the key never
/// lands in an error message.
fn endpoint_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
