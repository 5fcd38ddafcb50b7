use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use alsokal_core::{AppConfig, Environment};
use alsokal_youtube::YoutubeClient;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::middleware::session_token;

const SECRET: &str = "road-trip";

fn config(secret: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Development,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        log_level: "info".to_string(),
        data_dir: PathBuf::from("./data"),
        dashboard_secret: secret.map(str::to_string),
        session_max_age_secs: 3_600,
        youtube_api_key: None,
        youtube_channel_id: "UC1".to_string(),
        youtube_timeout_secs: 5,
        youtube_cache_secs: 3_600,
        contact_rate_limit: 10,
    }
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, contents).expect("write fixture");
}

fn state(root: &Path, secret: Option<&str>, youtube: YoutubeState) -> AppState {
    AppState {
        store: DataStore::new(root),
        auth: AuthState::from_config(&config(secret)).expect("auth"),
        youtube,
    }
}

fn no_youtube() -> YoutubeState {
    YoutubeState::new(None, "UC1", Duration::from_secs(60))
}

fn app(root: &Path, secret: Option<&str>) -> Router {
    build_app(
        state(root, secret, no_youtube()),
        contact_rate_limit_state(10),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(
            header::COOKIE,
            format!("alsokal-auth={}", session_token(SECRET)),
        )
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("not_found", StatusCode::NOT_FOUND),
        ("not_configured", StatusCode::SERVICE_UNAVAILABLE),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
        ("something_else", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        let response = ApiError::new("req-1", code, "msg").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[tokio::test]
async fn health_reports_data_directory() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(get("/api/v1/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn health_is_degraded_without_data_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let response = app(&missing, Some(SECRET))
        .oneshot(get("/api/v1/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["data"]["data_dir"], "unavailable");
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .uri("/api/v1/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .expect("request");
    let response = app(dir.path(), None).oneshot(request).await.expect("response");

    assert_eq!(response.headers()["x-request-id"], "abc-123");
    let json = json_body(response).await;
    assert_eq!(json["meta"]["request_id"], "abc-123");
}

#[tokio::test]
async fn protected_route_requires_session_cookie() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(get("/api/v1/dashboard"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn wrong_session_cookie_is_rejected() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .uri("/api/v1/revenue")
        .header(header::COOKIE, format!("alsokal-auth={SECRET}"))
        .body(Body::empty())
        .expect("request");
    let response = app(dir.path(), Some(SECRET))
        .oneshot(request)
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_session_reaches_dashboard() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(authed_get("/api/v1/dashboard"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    let json = json_body(response).await;
    assert_eq!(json["data"]["action_item_total"], 0);
    assert_eq!(json["data"]["revenue"]["target"], "100000");
}

fn seed_seven_actions(root: &Path) {
    let tomorrow = (chrono::Utc::now() + chrono::Duration::days(1)).to_rfc3339();
    let calendar: Vec<serde_json::Value> = (1..=6)
        .map(|n| {
            serde_json::json!({
                "id": format!("c{n}"),
                "title": format!("Episode {n}"),
                "status": "idea",
                "scheduledDate": tomorrow,
            })
        })
        .collect();
    write(
        root,
        "calendar/entries.json",
        &serde_json::Value::Array(calendar).to_string(),
    );
    write(
        root,
        "inquiries/entries.json",
        r#"[{"id":"i1","company":"Gear Co","status":"new"}]"#,
    );
}

#[tokio::test]
async fn actions_route_returns_the_uncapped_list() {
    let dir = TempDir::new().unwrap();
    seed_seven_actions(dir.path());

    let response = app(dir.path(), Some(SECRET))
        .oneshot(authed_get("/api/v1/actions"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let items = json["data"].as_array().expect("array");
    assert_eq!(items.len(), 7);
    assert_eq!(items[0]["type"], "inquiries");
    assert!(items[1..]
        .iter()
        .all(|item| item["title"].as_str().is_some_and(|t| t.starts_with("Content due: "))));
}

#[tokio::test]
async fn dashboard_caps_actions_but_reports_the_total() {
    let dir = TempDir::new().unwrap();
    seed_seven_actions(dir.path());

    let response = app(dir.path(), Some(SECRET))
        .oneshot(authed_get("/api/v1/dashboard"))
        .await
        .expect("response");

    let json = json_body(response).await;
    assert_eq!(json["data"]["action_items"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["data"]["action_item_total"], 7);
}

#[tokio::test]
async fn analytics_aligns_growth_series_across_platforms() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "platforms/tiktok.json",
        r#"{"platform":"tiktok","followers":1200,"engagementRate":4.0,
            "history":[{"date":"2024-05-02","followers":1200},{"date":"2024-05-01","followers":1100}]}"#,
    );
    write(
        dir.path(),
        "platforms/youtube-long.json",
        r#"{"platform":"youtube-long","followers":800,"engagementRate":2.0,
            "history":[{"date":"2024-05-02","followers":800}]}"#,
    );

    let response = app(dir.path(), Some(SECRET))
        .oneshot(authed_get("/api/v1/analytics"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["total_followers"], 2_000);
    let series = json["data"]["series"].as_array().expect("series");
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["date"], "2024-05-01");
    assert_eq!(series[0]["tiktok"], 1_100);
    assert!(series[0].get("youtube-long").is_none());
    assert_eq!(series[1]["youtube-long"], 800);
}

#[tokio::test]
async fn auth_gate_is_open_without_secret_in_development() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), None)
        .oneshot(get("/api/v1/platforms"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn login_sets_hashed_session_cookie() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(post_json(
            "/api/v1/auth",
            &serde_json::json!({ "password": SECRET }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .expect("ascii cookie")
        .to_string();
    assert!(cookie.starts_with(&format!("alsokal-auth={}", session_token(SECRET))));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains(SECRET));
    let json = json_body(response).await;
    assert_eq!(json["data"]["authenticated"], true);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(post_json(
            "/api/v1/auth",
            &serde_json::json!({ "password": "guess" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn login_without_secret_is_not_configured() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), None)
        .oneshot(post_json(
            "/api/v1/auth",
            &serde_json::json!({ "password": "x" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
}

fn post_raw(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn malformed_bodies_get_the_error_envelope() {
    let dir = TempDir::new().unwrap();
    let app = app(dir.path(), Some(SECRET));
    let requests = [
        post_raw("/api/v1/auth", "application/json", "{not json"),
        post_raw("/api/v1/auth", "text/plain", "password=road-trip"),
        post_raw("/api/v1/contact", "application/json", r#"{"name": 5}"#),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "bad_request", "{uri}");
        assert!(json["meta"]["request_id"].is_string(), "{uri}");
    }
    assert!(!dir.path().join("inquiries/entries.json").exists());
}

#[tokio::test]
async fn logout_expires_cookie() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), Some(SECRET))
        .oneshot(post_json("/api/v1/auth/logout", &serde_json::json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("alsokal-auth=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn contact_form_appends_inquiry() {
    let dir = TempDir::new().unwrap();
    let body = serde_json::json!({
        "name": "Sam",
        "email": "sam@gear.co",
        "company": "Gear Co",
        "message": "Sponsor a build video?",
        "budgetRange": "$5k-$10k",
        "platforms": ["youtube", "instagram"]
    });
    let response = app(dir.path(), Some(SECRET))
        .oneshot(post_json("/api/v1/contact", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    let id = json["data"]["id"].as_str().expect("id").to_string();

    let stored = DataStore::new(dir.path()).load_inquiries().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].company, "Gear Co");
    assert_eq!(stored[0].budget_range, "$5k-$10k");
    assert_eq!(stored[0].status, alsokal_core::InquiryStatus::New);
}

#[tokio::test]
async fn contact_form_rejects_blank_fields() {
    let dir = TempDir::new().unwrap();
    let body = serde_json::json!({
        "name": "Sam",
        "email": "sam@gear.co",
        "company": "  ",
        "message": "hi"
    });
    let response = app(dir.path(), Some(SECRET))
        .oneshot(post_json("/api/v1/contact", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(!dir.path().join("inquiries/entries.json").exists());
}

#[tokio::test]
async fn contact_form_is_rate_limited() {
    let dir = TempDir::new().unwrap();
    let app = build_app(
        state(dir.path(), Some(SECRET), no_youtube()),
        contact_rate_limit_state(1),
    );
    let body = serde_json::json!({
        "name": "Sam",
        "email": "sam@gear.co",
        "company": "Gear Co",
        "message": "hi"
    });

    let first = app
        .clone()
        .oneshot(post_json("/api/v1/contact", &body))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json("/api/v1/contact", &body))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn media_kit_is_public_and_counts_followers() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "platforms/tiktok.json",
        r#"{"platform":"tiktok","followers":1200}"#,
    );
    write(
        dir.path(),
        "platforms/youtube-long.json",
        r#"{"platform":"youtube-long","followers":800}"#,
    );
    let response = app(dir.path(), Some(SECRET))
        .oneshot(get("/api/v1/media-kit"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["total_followers"], 2_000);
    assert_eq!(json["data"]["platforms"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["data"]["config"]["creatorName"], "AlsoKal");
}

#[tokio::test]
async fn revenue_lists_entries_newest_first_with_breakdowns() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "revenue/entries.json",
        r#"[
            {"id":"a","date":"2024-01-05","source":"patreon","amount":"100","status":"paid"},
            {"id":"b","date":"2024-03-01","source":"brand-deal","amount":"900","status":"pending"},
            {"id":"c","date":"2024-02-10","source":"patreon","amount":"50","status":"paid"}
        ]"#,
    );
    let response = app(dir.path(), None)
        .oneshot(get("/api/v1/revenue"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let ids: Vec<&str> = json["data"]["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(json["data"]["by_source"]["patreon"], "150");
    assert_eq!(json["data"]["by_month"]["2024-03"], "900");
    assert_eq!(json["data"]["pacing"]["pending"], "900");
    assert_eq!(json["data"]["pacing"]["earned"], "150");
}

#[tokio::test]
async fn partnerships_and_calendar_views_load() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "partnerships/entries.json",
        r#"[
            {"id":"p1","brandName":"Acme","stage":"negotiating","compensation":"2500"},
            {"id":"p2","brandName":"Done","stage":"completed","compensation":"1000"}
        ]"#,
    );
    write(
        dir.path(),
        "calendar/entries.json",
        r#"[{"id":"c1","title":"Tour","status":"editing","scheduledDate":"2024-06-01","isSponsored":true}]"#,
    );
    let app = app(dir.path(), None);

    let response = app
        .clone()
        .oneshot(get("/api/v1/partnerships"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["summary"]["active_count"], 1);
    assert_eq!(json["data"]["completed"].as_array().map(Vec::len), Some(1));

    let response = app
        .oneshot(get("/api/v1/calendar"))
        .await
        .expect("response");
    let json = json_body(response).await;
    assert_eq!(json["data"]["mix"]["sponsored"], 1);
    assert_eq!(json["data"]["mix"]["sponsored_share"], 100);
}

#[tokio::test]
async fn goals_view_includes_config_and_progress() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), None)
        .oneshot(get("/api/v1/goals"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["config"]["annualRevenueTarget"], "100000");
    assert_eq!(json["data"]["progress"]["quarters"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn youtube_without_key_is_not_configured() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path(), None)
        .oneshot(get("/api/v1/youtube"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
}

fn youtube_state(server: &MockServer) -> YoutubeState {
    let client = YoutubeClient::with_base_url("k", 5, &server.uri()).expect("client");
    YoutubeState::new(Some(client), "UC1", Duration::from_secs(600))
}

#[tokio::test]
async fn youtube_unknown_channel_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let app = build_app(
        state(dir.path(), None, youtube_state(&server)),
        contact_rate_limit_state(10),
    );
    let response = app.oneshot(get("/api/v1/youtube")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn youtube_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let app = build_app(
        state(dir.path(), None, youtube_state(&server)),
        contact_rate_limit_state(10),
    );
    let response = app.oneshot(get("/api/v1/youtube")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "upstream_error");
}

#[tokio::test]
async fn youtube_report_is_cached_between_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "id": "UC1",
                "snippet": { "title": "AlsoKal" },
                "statistics": { "subscriberCount": "42" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let app = build_app(
        state(dir.path(), None, youtube_state(&server)),
        contact_rate_limit_state(10),
    );

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get("/api/v1/youtube"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["channel"]["subscriber_count"], 42);
    }
}
