//! Channel report built from recent and most-viewed uploads.

use serde::Serialize;

use crate::types::{ChannelInfo, Video};

/// Recent uploads carried in the report body.
pub const RECENT_VIDEO_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMetrics {
    pub recent_video_count: usize,
    pub total_recent_views: u64,
    pub avg_views_per_video: u64,
    /// Likes per 100 views over recent uploads, one decimal place.
    pub engagement_rate: f64,
    pub shorts_count: usize,
    pub long_form_count: usize,
    pub shorts_engagement: f64,
    pub long_form_engagement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatBreakdown {
    pub count: usize,
    pub total_views: u64,
    pub avg_views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub channel: ChannelInfo,
    pub metrics: ChannelMetrics,
    pub recent_videos: Vec<Video>,
    pub top_videos: Vec<Video>,
    pub shorts: FormatBreakdown,
    pub long_form: FormatBreakdown,
}

struct Totals {
    count: usize,
    views: u64,
    likes: u64,
}

fn totals<'a>(videos: impl Iterator<Item = &'a Video>) -> Totals {
    videos.fold(
        Totals {
            count: 0,
            views: 0,
            likes: 0,
        },
        |acc, v| Totals {
            count: acc.count + 1,
            views: acc.views.saturating_add(v.view_count),
            likes: acc.likes.saturating_add(v.like_count),
        },
    )
}

/// `total / count` rounded half up; 0 when `count` is 0.
fn rounded_mean(total: u64, count: usize) -> u64 {
    let count = count as u64;
    if count == 0 {
        return 0;
    }
    total / count + u64::from(total % count * 2 >= count)
}

/// Likes as a percentage of views to one decimal; 0 with no views.
#[allow(clippy::cast_precision_loss)]
fn engagement(likes: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    (likes as f64 / views as f64 * 1_000.0).round() / 10.0
}

impl Totals {
    fn breakdown(&self) -> FormatBreakdown {
        FormatBreakdown {
            count: self.count,
            total_views: self.views,
            avg_views: rounded_mean(self.views, self.count),
        }
    }
}

#[must_use]
pub fn build_report(channel: ChannelInfo, recent: Vec<Video>, top: Vec<Video>) -> ChannelReport {
    let all = totals(recent.iter());
    let shorts = totals(recent.iter().filter(|v| v.is_short));
    let long_form = totals(recent.iter().filter(|v| !v.is_short));

    let metrics = ChannelMetrics {
        recent_video_count: all.count,
        total_recent_views: all.views,
        avg_views_per_video: rounded_mean(all.views, all.count),
        engagement_rate: engagement(all.likes, all.views),
        shorts_count: shorts.count,
        long_form_count: long_form.count,
        shorts_engagement: engagement(shorts.likes, shorts.views),
        long_form_engagement: engagement(long_form.likes, long_form.views),
    };

    let mut recent_videos = recent;
    recent_videos.truncate(RECENT_VIDEO_LIMIT);

    ChannelReport {
        channel,
        metrics,
        recent_videos,
        top_videos: top,
        shorts: shorts.breakdown(),
        long_form: long_form.breakdown(),
    }
}
