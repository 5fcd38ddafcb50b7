//! YouTube Data API v3 client and channel report aggregation.

mod client;
mod duration;
mod error;
mod summary;
pub mod types;

pub use client::{SearchOrder, YoutubeClient};
pub use duration::{duration_secs, is_short, SHORT_MAX_SECS};
pub use error::YoutubeError;
pub use summary::{
    build_report, ChannelMetrics, ChannelReport, FormatBreakdown, RECENT_VIDEO_LIMIT,
};
pub use types::{ChannelInfo, Video};
