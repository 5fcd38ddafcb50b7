//! The single record behind the dashboard landing view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::actions::{displayed_actions, prioritize_actions, ActionItem};
use crate::calendar::upcoming_content;
use crate::growth::{platform_cards, PlatformCard};
use crate::pipeline::{active_deals, summarize_pipeline, PipelineSummary};
use crate::records::{CalendarItem, Partnership, Snapshot};
use crate::revenue::{month_to_date, revenue_pacing, RevenuePacing};

/// Active deals previewed under the pipeline summary.
pub const ACTIVE_DEAL_PREVIEW: usize = 3;

#[derive(Debug, Serialize)]
pub struct DashboardSummary<'a> {
    pub revenue: RevenuePacing,
    pub this_month_revenue: Decimal,
    pub platforms: Vec<PlatformCard>,
    pub pipeline: PipelineSummary,
    pub active_deals: Vec<&'a Partnership>,
    pub upcoming: Vec<&'a CalendarItem>,
    /// At most the display cap.
    pub action_items: Vec<ActionItem>,
    /// Length of the uncapped action list.
    pub action_item_total: usize,
}

impl<'a> DashboardSummary<'a> {
    #[must_use]
    pub fn build(snapshot: &'a Snapshot, now: DateTime<Utc>) -> Self {
        let actions = prioritize_actions(
            &snapshot.partnerships,
            &snapshot.calendar,
            &snapshot.inquiries,
            now,
        );

        Self {
            revenue: revenue_pacing(
                &snapshot.revenue,
                snapshot.goals.annual_revenue_target,
                now,
            ),
            this_month_revenue: month_to_date(&snapshot.revenue, now),
            platforms: platform_cards(&snapshot.platforms),
            pipeline: summarize_pipeline(&snapshot.partnerships),
            active_deals: active_deals(&snapshot.partnerships)
                .into_iter()
                .take(ACTIVE_DEAL_PREVIEW)
                .collect(),
            upcoming: upcoming_content(&snapshot.calendar),
            action_items: displayed_actions(&actions).to_vec(),
            action_item_total: actions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::records::{
        DealStage, Inquiry, InquiryStatus, Platform, PlatformMetric, RevenueEntry, RevenueStatus,
    };

    #[test]
    fn empty_snapshot_is_all_zero_and_caught_up() {
        let snapshot = Snapshot::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let summary = DashboardSummary::build(&snapshot, now);
        assert_eq!(summary.revenue.earned, Decimal::ZERO);
        assert_eq!(summary.this_month_revenue, Decimal::ZERO);
        assert!(summary.platforms.is_empty());
        assert!(summary.action_items.is_empty());
        assert_eq!(summary.action_item_total, 0);
        assert_eq!(summary.pipeline.stage_counts.len(), 5);
    }

    #[test]
    fn summary_bundles_every_section() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let inquiries: Vec<Inquiry> = (0..2)
            .map(|i| Inquiry {
                company: format!("Co {i}"),
                status: InquiryStatus::New,
                ..Inquiry::default()
            })
            .collect();
        let partnerships: Vec<Partnership> = (0..6)
            .map(|i| Partnership {
                id: format!("p{i}"),
                stage: DealStage::Pitched,
                last_activity: "2024-05-01".into(),
                ..Partnership::default()
            })
            .collect();
        let snapshot = Snapshot {
            platforms: vec![PlatformMetric {
                platform: Platform::Tiktok,
                followers: 10,
                ..PlatformMetric::default()
            }],
            revenue: vec![RevenueEntry {
                date: "2024-06-02".into(),
                amount: Decimal::new(500, 0),
                status: RevenueStatus::Paid,
                ..RevenueEntry::default()
            }],
            partnerships,
            inquiries,
            ..Snapshot::default()
        };

        let summary = DashboardSummary::build(&snapshot, now);
        assert_eq!(summary.this_month_revenue, Decimal::new(500, 0));
        assert_eq!(summary.revenue.earned, Decimal::new(500, 0));
        assert_eq!(summary.platforms.len(), 1);
        assert_eq!(summary.pipeline.active_count, 6);
        assert_eq!(summary.active_deals.len(), ACTIVE_DEAL_PREVIEW);
        assert_eq!(summary.action_item_total, 7);
        assert_eq!(summary.action_items.len(), 5);
        assert_eq!(summary.action_items[0].title, "2 new brand inquiries");
    }
}
