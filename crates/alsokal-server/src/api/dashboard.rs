use alsokal_core::{prioritize_actions, DashboardSummary};
use axum::{extract::State, response::Response, Extension};
use chrono::Utc;

use crate::middleware::RequestId;

use super::{respond, AppState};

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let snapshot = state.store.load_snapshot().await;
    respond(req_id, DashboardSummary::build(&snapshot, Utc::now()))
}

/// Every action item, without the dashboard's display cap.
pub(super) async fn list_actions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let (partnerships, calendar, inquiries) = tokio::join!(
        state.store.load_partnerships(),
        state.store.load_calendar(),
        state.store.load_inquiries(),
    );
    let actions = prioritize_actions(&partnerships, &calendar, &inquiries, Utc::now());
    respond(req_id, actions)
}
