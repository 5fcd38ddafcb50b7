use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_payload, respond, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    password: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SessionData {
    authenticated: bool,
}

fn cookie_header(req_id: &RequestId, cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie).map_err(|e| {
        tracing::error!(error = %e, "session cookie is not a valid header value");
        ApiError::new(req_id.0.clone(), "internal_error", "could not start session")
    })
}

pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = json_payload(&req_id, body)?;
    let Some(token) = state.auth.token() else {
        return Err(ApiError::new(
            req_id.0,
            "not_configured",
            "dashboard auth is not configured",
        ));
    };

    if !state.auth.password_matches(&body.password) {
        tracing::warn!(request_id = %req_id.0, "dashboard login rejected");
        return Err(ApiError::new(req_id.0, "unauthorized", "invalid password"));
    }

    let cookie = cookie_header(&req_id, &state.auth.login_cookie(token))?;
    let body = respond(
        req_id,
        SessionData {
            authenticated: true,
        },
    );
    Ok(([(SET_COOKIE, cookie)], body).into_response())
}

pub(super) async fn logout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let cookie = cookie_header(&req_id, &state.auth.logout_cookie())?;
    let body = respond(
        req_id,
        SessionData {
            authenticated: false,
        },
    );
    Ok(([(SET_COOKIE, cookie)], body).into_response())
}
