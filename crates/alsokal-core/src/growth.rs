//! Cross-platform follower figures and the aligned growth chart series.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::records::{Platform, PlatformMetric};

/// One date of the multi-line growth chart.
///
/// A platform with no snapshot on `date` has no key in `followers`; the gap
/// is deliberate and must not be read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedSeriesRow {
    pub date: String,
    #[serde(flatten)]
    pub followers: BTreeMap<Platform, u64>,
}

/// Sparse outer join of every platform's history on exact date strings.
///
/// Rows are the ascending union of all snapshot dates. When a history repeats
/// a date, the first snapshot for it wins. `Unknown` platforms are left out.
#[must_use]
pub fn align_growth_series(platforms: &[PlatformMetric]) -> Vec<AlignedSeriesRow> {
    let mut lookup: BTreeMap<Platform, BTreeMap<&str, u64>> = BTreeMap::new();
    let mut dates: BTreeSet<&str> = BTreeSet::new();

    for metric in platforms.iter().filter(|m| m.platform.is_known()) {
        let by_date = lookup.entry(metric.platform).or_default();
        for point in &metric.history {
            dates.insert(point.date.as_str());
            by_date.entry(point.date.as_str()).or_insert(point.followers);
        }
    }

    dates
        .into_iter()
        .map(|date| AlignedSeriesRow {
            date: date.to_string(),
            followers: lookup
                .iter()
                .filter_map(|(platform, by_date)| {
                    by_date.get(date).map(|followers| (*platform, *followers))
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformOverview {
    pub total_followers: u64,
    /// Arithmetic mean of engagement rates; 0 with no platforms.
    pub avg_engagement: f64,
}

#[must_use]
pub fn platform_overview(platforms: &[PlatformMetric]) -> PlatformOverview {
    let total_followers = platforms
        .iter()
        .fold(0_u64, |acc, m| acc.saturating_add(m.followers));

    #[allow(clippy::cast_precision_loss)]
    let avg_engagement = if platforms.is_empty() {
        0.0
    } else {
        platforms.iter().map(|m| m.engagement_rate).sum::<f64>() / platforms.len() as f64
    };

    PlatformOverview {
        total_followers,
        avg_engagement,
    }
}

/// Stat card for one platform on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformCard {
    pub platform: Platform,
    pub label: &'static str,
    pub followers: u64,
    pub delta: i64,
    /// Followers in ascending date order.
    pub sparkline: Vec<u64>,
}

#[must_use]
pub fn platform_cards(platforms: &[PlatformMetric]) -> Vec<PlatformCard> {
    platforms
        .iter()
        .filter(|m| m.platform.is_known())
        .map(|m| PlatformCard {
            platform: m.platform,
            label: m.platform.label(),
            followers: m.followers,
            delta: m.followers_delta,
            sparkline: m.sorted_history().iter().map(|p| p.followers).collect(),
        })
        .collect()
}

/// Everything the analytics view shows.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    #[serde(flatten)]
    pub overview: PlatformOverview,
    pub series: Vec<AlignedSeriesRow>,
}

impl GrowthReport {
    #[must_use]
    pub fn build(platforms: &[PlatformMetric]) -> Self {
        Self {
            overview: platform_overview(platforms),
            series: align_growth_series(platforms),
        }
    }
}
