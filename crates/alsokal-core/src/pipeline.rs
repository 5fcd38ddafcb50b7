//! Brand-partnership pipeline summary and board grouping.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{DealStage, Partnership};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub active_count: usize,
    /// Compensation summed over active deals.
    pub pipeline_value: Decimal,
    /// One key per active stage, zero when empty.
    pub stage_counts: BTreeMap<DealStage, usize>,
    pub completed_count: usize,
    pub total_earned: Decimal,
    /// Mean compensation of completed deals; zero when there are none.
    pub avg_deal: Decimal,
}

/// One column of the pipeline board.
#[derive(Debug, Clone, Serialize)]
pub struct StageGroup<'a> {
    pub stage: DealStage,
    pub deals: Vec<&'a Partnership>,
}

/// Deals in any active stage, in input order.
#[must_use]
pub fn active_deals(partnerships: &[Partnership]) -> Vec<&Partnership> {
    partnerships.iter().filter(|p| p.stage.is_active()).collect()
}

/// Deals marked completed, in input order.
#[must_use]
pub fn completed_deals(partnerships: &[Partnership]) -> Vec<&Partnership> {
    partnerships
        .iter()
        .filter(|p| p.stage == DealStage::Completed)
        .collect()
}

#[must_use]
pub fn summarize_pipeline(partnerships: &[Partnership]) -> PipelineSummary {
    let active = active_deals(partnerships);
    let completed = completed_deals(partnerships);

    let mut stage_counts: BTreeMap<DealStage, usize> =
        DealStage::ACTIVE.iter().map(|stage| (*stage, 0)).collect();
    for deal in partnerships {
        if let Some(count) = stage_counts.get_mut(&deal.stage) {
            *count += 1;
        }
    }

    let pipeline_value = active.iter().map(|p| p.compensation).sum();
    let total_earned: Decimal = completed.iter().map(|p| p.compensation).sum();
    let avg_deal = if completed.is_empty() {
        Decimal::ZERO
    } else {
        total_earned / Decimal::from(completed.len())
    };

    PipelineSummary {
        active_count: active.len(),
        pipeline_value,
        stage_counts,
        completed_count: completed.len(),
        total_earned,
        avg_deal,
    }
}

/// Active deals grouped by stage in board order. Every active stage gets a
/// group, possibly empty, and deals keep their input order within a group.
#[must_use]
pub fn pipeline_board(partnerships: &[Partnership]) -> Vec<StageGroup<'_>> {
    DealStage::ACTIVE
        .iter()
        .map(|stage| StageGroup {
            stage: *stage,
            deals: partnerships.iter().filter(|p| p.stage == *stage).collect(),
        })
        .collect()
}

/// Summary, board, and completed history together.
#[derive(Debug, Serialize)]
pub struct PipelineReport<'a> {
    pub summary: PipelineSummary,
    pub board: Vec<StageGroup<'a>>,
    pub completed: Vec<&'a Partnership>,
}

impl<'a> PipelineReport<'a> {
    #[must_use]
    pub fn build(partnerships: &'a [Partnership]) -> Self {
        Self {
            summary: summarize_pipeline(partnerships),
            board: pipeline_board(partnerships),
            completed: completed_deals(partnerships),
        }
    }
}
