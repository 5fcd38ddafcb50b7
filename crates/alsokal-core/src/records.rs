//! Business records as they appear in the flat-file data store.
//!
//! Records are read-only snapshots. Field names follow the camelCase keys of
//! the JSON files, and every struct tolerates missing keys by falling back to
//! its `Default`. Closed enumerations carry an `Unknown` variant so an
//! unrecognised string never fails a load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::media_kit::MediaKitConfig;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Tiktok,
    Instagram,
    YoutubeShorts,
    YoutubeLong,
    Facebook,
    Snapchat,
    Patreon,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::YoutubeShorts => "youtube-shorts",
            Platform::YoutubeLong => "youtube-long",
            Platform::Facebook => "facebook",
            Platform::Snapchat => "snapchat",
            Platform::Patreon => "patreon",
            Platform::Unknown => "unknown",
        }
    }

    /// Human-facing name used on stat cards and chart legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Tiktok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::YoutubeShorts => "YT Shorts",
            Platform::YoutubeLong => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Snapchat => "Snapchat",
            Platform::Patreon => "Patreon",
            Platform::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Platform::Unknown
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RevenueSource {
    BrandDeal,
    Patreon,
    Adsense,
    Merch,
    Cameo,
    Affiliate,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RevenueSource {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RevenueSource::BrandDeal => "Brand Deals",
            RevenueSource::Patreon => "Patreon",
            RevenueSource::Adsense => "AdSense",
            RevenueSource::Merch => "Merch",
            RevenueSource::Cameo => "Cameo",
            RevenueSource::Affiliate => "Affiliate",
            RevenueSource::Other => "Other",
            RevenueSource::Unknown => "Unknown",
        }
    }
}

/// Only `Paid` counts toward earned revenue; `Pending` and `Invoiced` are
/// outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueStatus {
    Pending,
    Invoiced,
    Paid,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RevenueStatus {
    #[must_use]
    pub fn is_outstanding(self) -> bool {
        matches!(self, RevenueStatus::Pending | RevenueStatus::Invoiced)
    }
}

/// Brand-deal pipeline stage. Declaration order is pipeline order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DealStage {
    Lead,
    Pitched,
    Negotiating,
    Contracted,
    Delivering,
    Completed,
    Declined,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DealStage {
    /// Stages that make up the open pipeline, in board order.
    pub const ACTIVE: [DealStage; 5] = [
        DealStage::Lead,
        DealStage::Pitched,
        DealStage::Negotiating,
        DealStage::Contracted,
        DealStage::Delivering,
    ];

    #[must_use]
    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    /// Active stages where the creator is waiting on the brand. `Lead` is
    /// excluded: nothing has been sent yet.
    #[must_use]
    pub fn awaits_follow_up(self) -> bool {
        matches!(
            self,
            DealStage::Pitched
                | DealStage::Negotiating
                | DealStage::Contracted
                | DealStage::Delivering
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DealStage::Lead => "lead",
            DealStage::Pitched => "pitched",
            DealStage::Negotiating => "negotiating",
            DealStage::Contracted => "contracted",
            DealStage::Delivering => "delivering",
            DealStage::Completed => "completed",
            DealStage::Declined => "declined",
            DealStage::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::Pitched => "Pitched",
            DealStage::Negotiating => "Negotiating",
            DealStage::Contracted => "Contracted",
            DealStage::Delivering => "Delivering",
            DealStage::Completed => "Completed",
            DealStage::Declined => "Declined",
            DealStage::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Idea,
    Scripting,
    Filming,
    Editing,
    Scheduled,
    Published,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContentStatus {
    /// Still in pre-production: nothing has been shot yet.
    #[must_use]
    pub fn is_early(self) -> bool {
        matches!(self, ContentStatus::Idea | ContentStatus::Scripting)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Idea => "idea",
            ContentStatus::Scripting => "scripting",
            ContentStatus::Filming => "filming",
            ContentStatus::Editing => "editing",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
            ContentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Reviewed,
    Responded,
    Archived,
    #[default]
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Platform metrics
// ---------------------------------------------------------------------------

/// One follower/view sample in a platform's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrowthSnapshot {
    /// `YYYY-MM-DD`. Compared as an exact string when aligning series.
    pub date: String,
    pub followers: u64,
    pub views: u64,
}

/// Current snapshot of one social platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformMetric {
    pub platform: Platform,
    pub display_name: String,
    pub handle: String,
    pub url: String,
    pub snapshot_date: String,
    pub followers: u64,
    pub followers_delta: i64,
    pub total_views: u64,
    pub engagement_rate: f64,
    pub posts_count: u64,
    pub avg_views_per_post: f64,
    pub avg_likes_per_post: f64,
    pub avg_comments_per_post: f64,
    /// Not guaranteed to be in date order.
    pub history: Vec<GrowthSnapshot>,
}

impl PlatformMetric {
    /// History samples in ascending date order.
    #[must_use]
    pub fn sorted_history(&self) -> Vec<&GrowthSnapshot> {
        let mut points: Vec<&GrowthSnapshot> = self.history.iter().collect();
        points.sort_by(|a, b| a.date.cmp(&b.date));
        points
    }
}

// ---------------------------------------------------------------------------
// Revenue, partnerships, calendar, inquiries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueEntry {
    pub id: String,
    pub date: String,
    pub source: RevenueSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    pub amount: Decimal,
    pub description: String,
    pub status: RevenueStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Partnership {
    pub id: String,
    pub brand_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_logo: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub platforms: Vec<Platform>,
    pub campaign_name: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub deliverables: Vec<String>,
    pub compensation: Decimal,
    pub stage: DealStage,
    /// Timestamp of the last touch on this deal.
    pub last_activity: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarItem {
    pub id: String,
    pub title: String,
    pub platforms: Vec<Platform>,
    pub scheduled_date: String,
    pub status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnership_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
    pub is_sponsored: bool,
}

/// Inbound brand inquiry from the public contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub date: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub budget_range: String,
    pub campaign_type: String,
    pub platforms: Vec<String>,
    pub timeline: String,
    pub message: String,
    pub status: InquiryStatus,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarterlyTargets {
    pub q1: Decimal,
    pub q2: Decimal,
    pub q3: Decimal,
    pub q4: Decimal,
}

impl Default for QuarterlyTargets {
    fn default() -> Self {
        Self {
            q1: Decimal::new(15_000, 0),
            q2: Decimal::new(25_000, 0),
            q3: Decimal::new(30_000, 0),
            q4: Decimal::new(30_000, 0),
        }
    }
}

impl QuarterlyTargets {
    /// Target for quarter `1..=4`; anything else is zero.
    #[must_use]
    pub fn for_quarter(&self, quarter: u32) -> Decimal {
        match quarter {
            1 => self.q1,
            2 => self.q2,
            3 => self.q3,
            4 => self.q4,
            _ => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformTarget {
    pub platform: Platform,
    pub target_followers: u64,
    pub target_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub target_date: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateCardItem {
    pub content_type: String,
    pub platform: Platform,
    pub rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalsConfig {
    pub annual_revenue_target: Decimal,
    pub quarterly_targets: QuarterlyTargets,
    pub platform_targets: Vec<PlatformTarget>,
    pub milestones: Vec<Milestone>,
    pub rate_card: Vec<RateCardItem>,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            annual_revenue_target: Decimal::new(100_000, 0),
            quarterly_targets: QuarterlyTargets::default(),
            platform_targets: Vec::new(),
            milestones: Vec::new(),
            rate_card: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Every collection the dashboard reads, loaded once per request.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub platforms: Vec<PlatformMetric>,
    pub revenue: Vec<RevenueEntry>,
    pub partnerships: Vec<Partnership>,
    pub calendar: Vec<CalendarItem>,
    pub inquiries: Vec<Inquiry>,
    pub goals: GoalsConfig,
    pub media_kit: MediaKitConfig,
}
