//! Revenue totals, annual-goal pacing, and revenue breakdowns.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{RevenueEntry, RevenueSource, RevenueStatus};
use crate::time::parse_date;

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaceStatus {
    OnTrack,
    Behind,
}

/// Earned revenue measured against a linearly prorated annual target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePacing {
    pub earned: Decimal,
    pub pending: Decimal,
    pub target: Decimal,
    /// Share of the target earned, clamped to `[0, 100]`.
    pub percentage: Decimal,
    pub months_elapsed: u32,
    pub expected_pace: Decimal,
    pub pace_status: PaceStatus,
    pub pace_delta: Decimal,
    pub projected_annual: Decimal,
}

/// Sum of `paid` entries.
#[must_use]
pub fn earned_total(entries: &[RevenueEntry]) -> Decimal {
    entries
        .iter()
        .filter(|e| e.status == RevenueStatus::Paid)
        .map(|e| e.amount)
        .sum()
}

/// Sum of `pending` and `invoiced` entries.
#[must_use]
pub fn outstanding_total(entries: &[RevenueEntry]) -> Decimal {
    entries
        .iter()
        .filter(|e| e.status.is_outstanding())
        .map(|e| e.amount)
        .sum()
}

/// Pacing of `entries` against `annual_target`, with the calendar month of
/// `now` as the number of elapsed months.
#[must_use]
pub fn revenue_pacing(
    entries: &[RevenueEntry],
    annual_target: Decimal,
    now: DateTime<Utc>,
) -> RevenuePacing {
    pacing_from_totals(
        earned_total(entries),
        outstanding_total(entries),
        annual_target,
        now.month(),
    )
}

/// Pacing arithmetic over precomputed totals.
///
/// A zero or negative target yields a 0% share, and zero elapsed months yield
/// a zero projection.
#[must_use]
pub fn pacing_from_totals(
    earned: Decimal,
    pending: Decimal,
    target: Decimal,
    months_elapsed: u32,
) -> RevenuePacing {
    let months = Decimal::from(months_elapsed);
    let year = Decimal::from(MONTHS_PER_YEAR);
    // Multiply before dividing so whole-number targets stay exact.
    let expected_pace = target.saturating_mul(months) / year;

    let pace_status = if earned >= expected_pace {
        PaceStatus::OnTrack
    } else {
        PaceStatus::Behind
    };

    let projected_annual = if months_elapsed == 0 {
        Decimal::ZERO
    } else {
        earned.saturating_mul(year) / months
    };

    RevenuePacing {
        earned,
        pending,
        target,
        percentage: percent_of(earned, target),
        months_elapsed,
        expected_pace,
        pace_status,
        pace_delta: (earned - expected_pace).abs(),
        projected_annual,
    }
}

/// `part / whole * 100`, clamped to `[0, 100]`, and 0 when `whole <= 0`.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO || part <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ONE_HUNDRED, |pct| pct.min(Decimal::ONE_HUNDRED))
}

/// Totals per source across every entry, whatever its status.
#[must_use]
pub fn totals_by_source(entries: &[RevenueEntry]) -> BTreeMap<RevenueSource, Decimal> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.source).or_insert(Decimal::ZERO) += entry.amount;
    }
    totals
}

/// Totals per calendar month keyed `YYYY-MM`, ascending. Entries without a
/// parseable date are left out.
#[must_use]
pub fn totals_by_month(entries: &[RevenueEntry]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        let Some(date) = parse_date(&entry.date) else {
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        *totals.entry(key).or_insert(Decimal::ZERO) += entry.amount;
    }
    totals
}

/// Revenue dated in the same year and month as `now`, any status.
#[must_use]
pub fn month_to_date(entries: &[RevenueEntry], now: DateTime<Utc>) -> Decimal {
    entries
        .iter()
        .filter(|e| {
            parse_date(&e.date).is_some_and(|d| d.year() == now.year() && d.month() == now.month())
        })
        .map(|e| e.amount)
        .sum()
}

/// Entries newest first; undated entries sink to the end in input order.
#[must_use]
pub fn newest_first(entries: &[RevenueEntry]) -> Vec<&RevenueEntry> {
    let mut sorted: Vec<&RevenueEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)));
    sorted
}

/// Everything the revenue view shows.
#[derive(Debug, Serialize)]
pub struct RevenueReport<'a> {
    pub pacing: RevenuePacing,
    pub this_month: Decimal,
    pub by_source: BTreeMap<RevenueSource, Decimal>,
    pub by_month: BTreeMap<String, Decimal>,
    pub entries: Vec<&'a RevenueEntry>,
}

impl<'a> RevenueReport<'a> {
    #[must_use]
    pub fn build(entries: &'a [RevenueEntry], annual_target: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            pacing: revenue_pacing(entries, annual_target, now),
            this_month: month_to_date(entries, now),
            by_source: totals_by_source(entries),
            by_month: totals_by_month(entries),
            entries: newest_first(entries),
        }
    }
}
