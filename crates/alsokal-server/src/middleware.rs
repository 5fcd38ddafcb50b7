use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use alsokal_core::AppConfig;
use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "alsokal-auth";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Hex SHA-256 of a credential. The session cookie carries this digest of the
/// secret, never the secret itself.
#[must_use]
pub fn session_token(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

/// Session settings shared by the login handler and the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    token: Option<Arc<str>>,
    pub enabled: bool,
    pub secure_cookie: bool,
    pub max_age_secs: u64,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("configured", &self.token.is_some())
            .field("enabled", &self.enabled)
            .field("secure_cookie", &self.secure_cookie)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

impl AuthState {
    /// Builds auth settings from `DASHBOARD_SECRET`.
    ///
    /// In development a missing secret disables the gate for local iteration.
    /// Elsewhere a missing secret fails startup.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let secure_cookie = matches!(config.env, alsokal_core::Environment::Production);
        let max_age_secs = config.session_max_age_secs;

        match config.dashboard_secret.as_deref() {
            Some(secret) => Ok(Self {
                token: Some(Arc::from(session_token(secret))),
                enabled: true,
                secure_cookie,
                max_age_secs,
            }),
            None if config.env.is_development() => {
                tracing::warn!(
                    "DASHBOARD_SECRET not set; dashboard auth disabled in development environment"
                );
                Ok(Self {
                    token: None,
                    enabled: false,
                    secure_cookie,
                    max_age_secs,
                })
            }
            None => anyhow::bail!("DASHBOARD_SECRET is required outside development"),
        }
    }

    /// Constant-time check of a submitted password against the secret.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.token_matches(&session_token(password))
    }

    fn token_matches(&self, candidate: &str) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| bool::from(token.as_bytes().ct_eq(candidate.as_bytes())))
    }

    /// The stored session token, if a secret is configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Set-Cookie` value that starts a session.
    #[must_use]
    pub fn login_cookie(&self, token: &str) -> String {
        self.cookie(token, self.max_age_secs)
    }

    /// `Set-Cookie` value that ends a session.
    #[must_use]
    pub fn logout_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie =
            format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter shared by every caller of the wrapped routes.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

fn middleware_error(status: StatusCode, code: &'static str, message: &'static str) -> Response {
    (
        status,
        Json(MiddlewareErrorBody {
            error: MiddlewareError { code, message },
        }),
    )
        .into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing the session cookie when auth is enabled.
pub async fn require_session(State(auth): State<AuthState>, req: Request, next: Next) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    match session_cookie(req.headers()) {
        Some(candidate) if auth.token_matches(candidate) => next.run(req).await,
        _ => middleware_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid session",
        ),
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return middleware_error(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded",
        );
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

/// Value of the session cookie across every `Cookie` header.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
