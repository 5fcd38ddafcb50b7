//! Per-section dashboard views. Each handler loads only the files it needs and
//! recomputes its aggregates on every request.

use alsokal_core::{
    calendar::CalendarReport, goal_progress, growth::GrowthReport, pipeline::PipelineReport,
    GoalProgress, GoalsConfig, RevenueReport,
};
use axum::{extract::State, response::Response, Extension};
use chrono::Utc;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{respond, AppState};

#[derive(Debug, Serialize)]
pub(super) struct GoalsView<'a> {
    config: &'a GoalsConfig,
    progress: GoalProgress,
}

pub(super) async fn list_platforms(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    respond(req_id, state.store.load_platforms().await)
}

pub(super) async fn get_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let platforms = state.store.load_platforms().await;
    respond(req_id, GrowthReport::build(&platforms))
}

pub(super) async fn get_revenue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let (entries, goals) = tokio::join!(state.store.load_revenue(), state.store.load_goals());
    let report = RevenueReport::build(&entries, goals.annual_revenue_target, Utc::now());
    respond(req_id, report)
}

pub(super) async fn get_partnerships(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let partnerships = state.store.load_partnerships().await;
    respond(req_id, PipelineReport::build(&partnerships))
}

pub(super) async fn get_calendar(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let items = state.store.load_calendar().await;
    respond(req_id, CalendarReport::build(&items))
}

pub(super) async fn get_goals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let (goals, platforms) = tokio::join!(state.store.load_goals(), state.store.load_platforms());
    let progress = goal_progress(&goals, &platforms, Utc::now());
    respond(
        req_id,
        GoalsView {
            config: &goals,
            progress,
        },
    )
}
