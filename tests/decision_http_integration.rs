//! Integration tests for the decision HTTP endpoints.
//!
//! Builds the full router over in-memory adapters and drives it with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use what_to_eat::adapters::auth::MockSessionValidator;
use what_to_eat::adapters::http::{api_router, AuthState, DecisionHandlers};
use what_to_eat::adapters::in_memory::{InMemoryDecisionRepository, InMemoryMenuCatalog};
use what_to_eat::adapters::FixedClock;
use what_to_eat::application::{DecideHandler, GetHistoryHandler, GetTodayDecisionHandler};
use what_to_eat::domain::decision::{CivilCalendar, MenuItem, RestaurantRef, FRESH_MESSAGE};
use what_to_eat::domain::foundation::{MenuItemId, RestaurantId, Timestamp};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "token-user-1";

fn now() -> Timestamp {
    Timestamp::from_datetime(
        DateTime::parse_from_rfc3339("2024-06-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
    )
}

struct TestApp {
    router: Router,
    catalog: Arc<InMemoryMenuCatalog>,
    clock: Arc<FixedClock>,
}

fn app_with_menus(items: Vec<MenuItem>) -> TestApp {
    let calendar = CivilCalendar::utc();
    let catalog = Arc::new(InMemoryMenuCatalog::with_items(items));
    let repository = Arc::new(InMemoryDecisionRepository::new(calendar));
    let clock = Arc::new(FixedClock::new(now()));

    let handlers = DecisionHandlers::new(
        Arc::new(DecideHandler::new(catalog.clone(), repository.clone(), clock.clone())),
        Arc::new(GetHistoryHandler::new(repository.clone(), catalog.clone(), clock.clone())),
        Arc::new(GetTodayDecisionHandler::new(
            repository,
            catalog.clone(),
            clock.clone(),
            calendar,
        )),
    );
    let auth: AuthState = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, 1));

    TestApp {
        router: api_router(handlers, auth),
        catalog,
        clock,
    }
}

fn default_app() -> TestApp {
    app_with_menus(vec![MenuItem::new(
        MenuItemId::new(1),
        "酸菜鱼",
        RestaurantRef::new(RestaurantId::new(5), "鱼庄"),
    )])
}

fn authed(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Health and auth
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = default_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn api_requires_token() {
    let app = default_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/decide")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = default_app();
    let request = Request::builder()
        .uri("/api/history")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// POST /api/decide
// =============================================================================

#[tokio::test]
async fn decide_with_empty_body_picks_from_catalog() {
    let app = default_app();

    let (status, body) = send(&app.router, authed("POST", "/api/decide", Body::empty())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menu"]["id"], 1);
    assert_eq!(body["menu"]["dish_name"], "酸菜鱼");
    assert_eq!(body["menu"]["restaurant"]["name"], "鱼庄");
    assert_eq!(body["message"], FRESH_MESSAGE);
    assert_eq!(body["outcome"], "fresh");
    assert!(body["decided_at"].as_str().unwrap().starts_with("2024-06-10T12:00:00"));
}

#[tokio::test]
async fn decide_with_ids_and_repeat_next_day() {
    let app = default_app();
    let body = || Body::from(json!({ "menu_ids": [1] }).to_string());

    let (status, _) = send(&app.router, authed("POST", "/api/decide", body())).await;
    assert_eq!(status, StatusCode::OK);

    app.clock.advance_days(1);
    let (status, json) = send(&app.router, authed("POST", "/api/decide", body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "repeat");
}

#[tokio::test]
async fn decide_with_no_menus_is_bad_request() {
    let app = app_with_menus(vec![]);

    let (status, body) = send(&app.router, authed("POST", "/api/decide", Body::empty())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_MENUS");
}

#[tokio::test]
async fn decide_with_unknown_ids_is_bad_request() {
    let app = default_app();
    let body = Body::from(json!({ "menu_ids": [99, -3] }).to_string());

    let (status, json) = send(&app.router, authed("POST", "/api/decide", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "NO_MENUS");
}

#[tokio::test]
async fn decide_with_malformed_body_picks_from_catalog() {
    let app = default_app();
    let body = Body::from(r#"{"menu_ids": "all"}"#);

    let (status, json) = send(&app.router, authed("POST", "/api/decide", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["menu"]["id"], 1);
    assert_eq!(json["outcome"], "fresh");
}

// =============================================================================
// GET /api/history and /api/decisions/today
// =============================================================================

#[tokio::test]
async fn history_lists_decisions_with_menu() {
    let app = default_app();
    send(&app.router, authed("POST", "/api/decide", Body::empty())).await;
    app.clock.advance_days(1);
    send(&app.router, authed("POST", "/api/decide", Body::empty())).await;

    let (status, body) = send(&app.router, authed("GET", "/api/history", Body::empty())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records[0]["decided_on"], "2024-06-11");
    assert_eq!(records[1]["decided_on"], "2024-06-10");
    assert_eq!(records[0]["menu"]["dish_name"], "酸菜鱼");
}

#[tokio::test]
async fn history_keeps_records_of_removed_menus() {
    let app = default_app();
    send(&app.router, authed("POST", "/api/decide", Body::empty())).await;
    app.catalog.remove(MenuItemId::new(1));

    let (_, body) = send(&app.router, authed("GET", "/api/history", Body::empty())).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["menu_id"], 1);
    assert!(body["records"][0]["menu"].is_null());
}

#[tokio::test]
async fn today_is_null_until_decided() {
    let app = default_app();

    let (status, body) = send(&app.router, authed("GET", "/api/decisions/today", Body::empty())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["record"].is_null());

    send(&app.router, authed("POST", "/api/decide", Body::empty())).await;

    let (_, body) = send(&app.router, authed("GET", "/api/decisions/today", Body::empty())).await;
    assert_eq!(body["record"]["menu_id"], 1);
    assert_eq!(body["record"]["user_id"], 1);
}
