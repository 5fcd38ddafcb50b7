mod auth;
mod contact;
mod dashboard;
mod insights;
mod media_kit;
mod youtube;

use alsokal_data::DataStore;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::middleware::{
    enforce_rate_limit, request_id, require_session, AuthState, RateLimitState, RequestId,
};

pub use youtube::YoutubeState;

#[derive(Clone)]
pub struct AppState {
    pub store: DataStore,
    pub auth: AuthState,
    pub youtube: YoutubeState,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    data_dir: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "not_configured" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Wraps `data` in the response envelope. The body is serialised here, so
/// `data` may borrow from handler locals.
pub(super) fn respond<T: Serialize>(req_id: RequestId, data: T) -> Response {
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}

/// Unwraps a JSON request body, turning axum's plain-text rejection into a
/// `bad_request` envelope.
pub(super) fn json_payload<T>(
    req_id: &RequestId,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected request body");
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/actions", get(dashboard::list_actions))
        .route("/api/v1/platforms", get(insights::list_platforms))
        .route("/api/v1/analytics", get(insights::get_analytics))
        .route("/api/v1/revenue", get(insights::get_revenue))
        .route("/api/v1/partnerships", get(insights::get_partnerships))
        .route("/api/v1/calendar", get(insights::get_calendar))
        .route("/api/v1/goals", get(insights::get_goals))
        .route("/api/v1/youtube", get(youtube::get_youtube))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                .layer(axum::middleware::from_fn_with_state(auth, require_session)),
        )
}

pub fn build_app(state: AppState, contact_rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/auth", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/media-kit", get(media_kit::get_media_kit))
        .route(
            "/api/v1/contact",
            post(contact::submit_inquiry).route_layer(axum::middleware::from_fn_with_state(
                contact_rate_limit,
                enforce_rate_limit,
            )),
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_router(state.auth.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    data_dir: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: data directory unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        data_dir: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

/// Contact-form limiter: `per_minute` submissions in a one-minute window.
#[must_use]
pub fn contact_rate_limit_state(per_minute: usize) -> RateLimitState {
    RateLimitState::new(per_minute, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
