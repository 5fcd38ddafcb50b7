//! Progress against the configured quarterly, follower, and milestone goals.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{GoalsConfig, Milestone, Platform, PlatformMetric, PlatformTarget};

/// Calendar quarter `1..=4` containing `now`.
#[must_use]
pub fn current_quarter(now: DateTime<Utc>) -> u32 {
    (now.month() + 2) / 3
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterTarget {
    pub quarter: u32,
    pub target: Decimal,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformTargetProgress {
    pub platform: Platform,
    pub label: &'static str,
    pub current_followers: u64,
    pub target_followers: u64,
    pub target_date: String,
    /// Clamped to `[0, 100]`.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current_quarter: u32,
    pub quarters: Vec<QuarterTarget>,
    pub platforms: Vec<PlatformTargetProgress>,
    pub milestones: MilestoneProgress,
}

fn quarter_targets(goals: &GoalsConfig, current: u32) -> Vec<QuarterTarget> {
    (1..=4)
        .map(|quarter| QuarterTarget {
            quarter,
            target: goals.quarterly_targets.for_quarter(quarter),
            is_current: quarter == current,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn follower_progress(target: &PlatformTarget, platforms: &[PlatformMetric]) -> PlatformTargetProgress {
    let current_followers = platforms
        .iter()
        .find(|m| m.platform == target.platform)
        .map_or(0, |m| m.followers);

    let percentage = if target.target_followers == 0 {
        0.0
    } else {
        (current_followers as f64 / target.target_followers as f64 * 100.0).clamp(0.0, 100.0)
    };

    PlatformTargetProgress {
        platform: target.platform,
        label: target.platform.label(),
        current_followers,
        target_followers: target.target_followers,
        target_date: target.target_date.clone(),
        percentage,
    }
}

#[must_use]
pub fn milestone_progress(milestones: &[Milestone]) -> MilestoneProgress {
    MilestoneProgress {
        completed: milestones.iter().filter(|m| m.completed).count(),
        total: milestones.len(),
    }
}

#[must_use]
pub fn goal_progress(
    goals: &GoalsConfig,
    platforms: &[PlatformMetric],
    now: DateTime<Utc>,
) -> GoalProgress {
    let current = current_quarter(now);
    GoalProgress {
        current_quarter: current,
        quarters: quarter_targets(goals, current),
        platforms: goals
            .platform_targets
            .iter()
            .map(|t| follower_progress(t, platforms))
            .collect(),
        milestones: milestone_progress(&goals.milestones),
    }
}
