//! YouTube Data API v3 response types and the trimmed records built from
//! them.
//!
//! Every list endpoint wraps its results in `{ "items": [...] }`;
//! [`ListResponse`] captures that envelope generically. Statistics arrive as
//! decimal strings and are parsed leniently to `u64`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::duration::is_short;

/// Accepts `"123"`, `123`, `null`, or garbage; anything unparseable is 0.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

// ---------------------------------------------------------------------------
// channels
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(deserialize_with = "lenient_count")]
    pub subscriber_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub video_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchId {
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: SearchId,
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub published_at: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentDetails {
    /// ISO 8601 duration, e.g. `PT1M5S`.
    pub duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub comment_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    pub content_details: ContentDetails,
    pub statistics: VideoStatistics,
}

// ---------------------------------------------------------------------------
// Trimmed records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub subscriber_count: u64,
    pub total_view_count: u64,
    pub video_count: u64,
}

impl From<ChannelItem> for ChannelInfo {
    fn from(item: ChannelItem) -> Self {
        Self {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail: item.snippet.thumbnails.high.map(|t| t.url),
            subscriber_count: item.statistics.subscriber_count,
            total_view_count: item.statistics.view_count,
            video_count: item.statistics.video_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub duration: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// Medium thumbnail, else default, else empty.
    pub thumbnail: String,
    pub is_short: bool,
}

impl From<VideoItem> for Video {
    fn from(item: VideoItem) -> Self {
        let thumbnails = item.snippet.thumbnails;
        let thumbnail = thumbnails
            .medium
            .or(thumbnails.default)
            .map(|t| t.url)
            .unwrap_or_default();

        Self {
            is_short: is_short(&item.content_details.duration),
            id: item.id,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
            duration: item.content_details.duration,
            view_count: item.statistics.view_count,
            like_count: item.statistics.like_count,
            comment_count: item.statistics.comment_count,
            thumbnail,
        }
    }
}
