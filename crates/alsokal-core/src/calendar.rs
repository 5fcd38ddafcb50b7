//! Content calendar views.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{CalendarItem, ContentStatus};
use crate::revenue::percent_of;
use crate::time::{parse_date, parse_instant};

pub const UPCOMING_DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentMix {
    pub sponsored: usize,
    pub organic: usize,
    /// Whole-number percentage of sponsored items; 0 for an empty calendar.
    pub sponsored_share: u32,
}

#[must_use]
pub fn content_mix(items: &[CalendarItem]) -> ContentMix {
    let sponsored = items.iter().filter(|i| i.is_sponsored).count();
    let organic = items.len() - sponsored;
    let share = percent_of(Decimal::from(sponsored), Decimal::from(items.len()));

    ContentMix {
        sponsored,
        organic,
        sponsored_share: share.round().to_u32().unwrap_or(0),
    }
}

#[must_use]
pub fn status_counts(items: &[CalendarItem]) -> BTreeMap<ContentStatus, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}

/// Items in ascending schedule order; unparseable dates sort last, ties keep
/// input order.
#[must_use]
pub fn sorted_by_date(items: &[CalendarItem]) -> Vec<&CalendarItem> {
    let mut sorted: Vec<(Option<DateTime<Utc>>, &CalendarItem)> = items
        .iter()
        .map(|item| (parse_instant(&item.scheduled_date), item))
        .collect();
    sorted.sort_by_key(|(when, _)| (when.is_none(), *when));
    sorted.into_iter().map(|(_, item)| item).collect()
}

/// Unpublished items, soonest first, capped at [`UPCOMING_DISPLAY_LIMIT`].
#[must_use]
pub fn upcoming_content(items: &[CalendarItem]) -> Vec<&CalendarItem> {
    sorted_by_date(items)
        .into_iter()
        .filter(|item| item.status != ContentStatus::Published)
        .take(UPCOMING_DISPLAY_LIMIT)
        .collect()
}

#[must_use]
pub fn items_on(items: &[CalendarItem], day: NaiveDate) -> Vec<&CalendarItem> {
    items
        .iter()
        .filter(|item| parse_date(&item.scheduled_date) == Some(day))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CalendarReport<'a> {
    pub items: Vec<&'a CalendarItem>,
    pub mix: ContentMix,
    pub status_counts: BTreeMap<ContentStatus, usize>,
}

impl<'a> CalendarReport<'a> {
    #[must_use]
    pub fn build(items: &'a [CalendarItem]) -> Self {
        Self {
            items: sorted_by_date(items),
            mix: content_mix(items),
            status_counts: status_counts(items),
        }
    }
}
