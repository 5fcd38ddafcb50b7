use thiserror::Error;

/// Errors returned by the YouTube API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response, or a 2xx body carrying an `error` object.
    #[error("YouTube API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The channel lookup returned no items.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),
}
