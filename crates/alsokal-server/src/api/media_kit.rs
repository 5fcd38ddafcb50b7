use alsokal_core::MediaKitView;
use axum::{extract::State, response::Response, Extension};

use crate::middleware::RequestId;

use super::{respond, AppState};

/// Public sponsor-facing kit with live follower counts.
pub(super) async fn get_media_kit(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let (config, platforms) =
        tokio::join!(state.store.load_media_kit(), state.store.load_platforms());
    respond(req_id, MediaKitView::build(&config, &platforms))
}
