//! Record types, aggregation engine, and configuration for the `AlsoKal`
//! creator dashboard.
//!
//! Every aggregation function in this crate is a pure recomputation over
//! already-loaded slices. Missing data is an empty slice, never an error, and
//! every division has a defined zero result.

pub mod actions;
pub mod app_config;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod goals;
pub mod growth;
pub mod media_kit;
pub mod pipeline;
pub mod records;
pub mod revenue;
pub mod time;

use thiserror::Error;

pub use actions::{
    displayed_actions, prioritize_actions, ActionDetail, ActionItem, Priority,
    ACTION_DISPLAY_LIMIT,
};
pub use app_config::{AppConfig, Environment};
pub use calendar::{content_mix, upcoming_content, ContentMix};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::DashboardSummary;
pub use goals::{goal_progress, GoalProgress};
pub use growth::{align_growth_series, platform_overview, AlignedSeriesRow, PlatformOverview};
pub use media_kit::{MediaKitConfig, MediaKitView};
pub use pipeline::{pipeline_board, summarize_pipeline, PipelineSummary, StageGroup};
pub use records::{
    CalendarItem, ContentStatus, DealStage, GoalsConfig, GrowthSnapshot, Inquiry, InquiryStatus,
    Milestone, Partnership, Platform, PlatformMetric, PlatformTarget, QuarterlyTargets,
    RateCardItem, RevenueEntry, RevenueSource, RevenueStatus, Snapshot,
};
pub use revenue::{revenue_pacing, PaceStatus, RevenuePacing, RevenueReport};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
