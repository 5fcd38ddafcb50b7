//! Prioritised to-do list synthesised from inquiries, deals, and the content
//! calendar.
//!
//! Three independent detectors each contribute zero or more items. The
//! combined list is stably sorted by priority, so ties keep the order
//! inquiries, then stale deals, then due content. An empty result means
//! everything is caught up.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::{CalendarItem, ContentStatus, Inquiry, InquiryStatus, Partnership};
use crate::time::{millis_between, parse_instant, MS_PER_DAY};

/// A deal with no activity for longer than this many days needs a follow-up.
pub const STALE_AFTER_DAYS: i64 = 7;

/// Unpublished content scheduled within this many days is due soon.
pub const DUE_SOON_DAYS: i64 = 3;

/// How many items the dashboard card shows.
pub const ACTION_DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// What an action item is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionDetail {
    Inquiries {
        count: usize,
        companies: Vec<String>,
    },
    StaleDeal {
        partnership_id: String,
        brand_name: String,
        campaign_name: String,
        days_idle: i64,
    },
    ContentDue {
        item_id: String,
        item_title: String,
        status: ContentStatus,
        scheduled_date: String,
    },
}

impl ActionDetail {
    /// The serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ActionDetail::Inquiries { .. } => "inquiries",
            ActionDetail::StaleDeal { .. } => "stale_deal",
            ActionDetail::ContentDue { .. } => "content_due",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub detail: ActionDetail,
}

/// One aggregate item for every inquiry still marked `new`.
#[must_use]
pub fn new_inquiry_action(inquiries: &[Inquiry]) -> Option<ActionItem> {
    let fresh: Vec<&Inquiry> = inquiries
        .iter()
        .filter(|i| i.status == InquiryStatus::New)
        .collect();
    if fresh.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    let companies: Vec<String> = fresh
        .iter()
        .map(|i| i.company.trim())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect();

    let count = fresh.len();
    let noun = if count == 1 { "inquiry" } else { "inquiries" };

    Some(ActionItem {
        priority: Priority::High,
        title: format!("{count} new brand {noun}"),
        description: companies.join(", "),
        detail: ActionDetail::Inquiries { count, companies },
    })
}

/// One item per deal awaiting follow-up whose last activity is strictly more
/// than [`STALE_AFTER_DAYS`] before `now`.
///
/// The reported day count is the floor of the same elapsed interval the
/// filter used, so a deal idle for 7.5 days reads "7 days".
#[must_use]
pub fn stale_deal_actions(partnerships: &[Partnership], now: DateTime<Utc>) -> Vec<ActionItem> {
    partnerships
        .iter()
        .filter(|p| p.stage.awaits_follow_up())
        .filter_map(|p| {
            let last = parse_instant(&p.last_activity)?;
            let idle_ms = millis_between(last, now);
            if idle_ms <= STALE_AFTER_DAYS * MS_PER_DAY {
                return None;
            }
            let days_idle = idle_ms.div_euclid(MS_PER_DAY);

            Some(ActionItem {
                priority: Priority::Medium,
                title: format!("Follow up: {}", p.brand_name),
                description: format!("{}: no activity in {days_idle} days", p.campaign_name),
                detail: ActionDetail::StaleDeal {
                    partnership_id: p.id.clone(),
                    brand_name: p.brand_name.clone(),
                    campaign_name: p.campaign_name.clone(),
                    days_idle,
                },
            })
        })
        .collect()
}

/// One item per unpublished piece scheduled within `[now, now + 3 days]`,
/// both ends inclusive. Pieces still at idea or scripting stage are high
/// priority.
#[must_use]
pub fn content_due_actions(calendar: &[CalendarItem], now: DateTime<Utc>) -> Vec<ActionItem> {
    calendar
        .iter()
        .filter(|item| item.status != ContentStatus::Published)
        .filter_map(|item| {
            let scheduled = parse_instant(&item.scheduled_date)?;
            let until_ms = millis_between(now, scheduled);
            if !(0..=DUE_SOON_DAYS * MS_PER_DAY).contains(&until_ms) {
                return None;
            }

            let priority = if item.status.is_early() {
                Priority::High
            } else {
                Priority::Medium
            };

            Some(ActionItem {
                priority,
                title: format!("Content due: {}", item.title),
                description: format!(
                    "Status: {} (due {})",
                    item.status,
                    scheduled.format("%b %-d")
                ),
                detail: ActionDetail::ContentDue {
                    item_id: item.id.clone(),
                    item_title: item.title.clone(),
                    status: item.status,
                    scheduled_date: item.scheduled_date.clone(),
                },
            })
        })
        .collect()
}

/// Every action item, highest priority first.
///
/// The list is not capped; use [`displayed_actions`] for the dashboard card.
#[must_use]
pub fn prioritize_actions(
    partnerships: &[Partnership],
    calendar: &[CalendarItem],
    inquiries: &[Inquiry],
    now: DateTime<Utc>,
) -> Vec<ActionItem> {
    let mut actions: Vec<ActionItem> = new_inquiry_action(inquiries).into_iter().collect();
    actions.extend(stale_deal_actions(partnerships, now));
    actions.extend(content_due_actions(calendar, now));

    // sort_by_key is stable
    actions.sort_by_key(|a| a.priority.rank());
    actions
}

/// The leading [`ACTION_DISPLAY_LIMIT`] items of an already-sorted list.
#[must_use]
pub fn displayed_actions(actions: &[ActionItem]) -> &[ActionItem] {
    &actions[..actions.len().min(ACTION_DISPLAY_LIMIT)]
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
