//! Integration Tests for API Endpoints
//!
//! Drives the full router against an in-memory SQLite store and the
//! in-process cache.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use order_service::{
    api::create_router,
    cache::{MemoryBackend, OrderCache},
    error::NotifyError,
    notify::{EmailRequest, Notifier},
    session::SessionStore,
    store::SqliteOrderStore,
    AppState, OrderService,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn send(&self, _email: &EmailRequest) -> Result<(), NotifyError> {
        Ok(())
    }
}

async fn create_test_app() -> Router {
    let store = SqliteOrderStore::in_memory().await.unwrap();
    let cache = OrderCache::new(Arc::new(MemoryBackend::new(16)), 30);
    let state = AppState::new(
        OrderService::new(Arc::new(store), cache),
        SessionStore::new(),
        Arc::new(SilentNotifier),
    );
    create_router(state)
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Logs in and returns the `name=value` pair to send back as a Cookie header.
async fn login(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/login", &format!("email={}", email), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn place_order(app: &Router, cookie: &str, body: &str) -> Response {
    app.clone()
        .oneshot(form_post("/orders", body, Some(cookie)))
        .await
        .unwrap()
}

async fn dashboard(app: &Router, cookie: &str) -> Value {
    let response = app.clone().oneshot(get("/", Some(cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response).await
}

fn products(dashboard: &Value) -> Vec<String> {
    dashboard["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["product"].as_str().unwrap().to_string())
        .collect()
}

// == Session Tests ==

#[tokio::test]
async fn test_dashboard_requires_login() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_login_redirect_target_is_served() {
    let app = create_test_app().await;

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();

    let response = app.oneshot(get(&location, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["action"], "/login");
    assert_eq!(json["method"], "POST");
    assert_eq!(json["fields"][0], "email");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = create_test_app().await;

    let response = app
        .oneshot(form_post("/login", "email=ada%40example.com", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("session_id="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_blank_email() {
    let app = create_test_app().await;

    let response = app.oneshot(form_post("/login", "email=", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_missing_email_field() {
    let app = create_test_app().await;

    let response = app.oneshot(form_post("/login", "", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_relogin_invalidates_older_cookie() {
    let app = create_test_app().await;
    let old = login(&app, "ada%40example.com").await;
    let new = login(&app, "ada%40example.com").await;

    let response = app.clone().oneshot(get("/", Some(&old))).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    dashboard(&app, &new).await;
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    let response = app
        .clone()
        .oneshot(form_post("/logout", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

// == Order Tests ==

#[tokio::test]
async fn test_empty_dashboard() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    let json = dashboard(&app, &cookie).await;

    assert_eq!(json["user_email"], "ada@example.com");
    assert_eq!(json["orders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_order_requires_login() {
    let app = create_test_app().await;

    let response = app
        .oneshot(form_post("/orders", "product=Lamp&quantity=1&price=2", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_create_order_appears_on_dashboard() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    let response = place_order(&app, &cookie, "product=Desk+Lamp&quantity=2&price=15.5").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let json = dashboard(&app, &cookie).await;
    let order = &json["orders"][0];
    assert_eq!(order["product"], "Desk Lamp");
    assert_eq!(order["quantity"], 2);
    assert_eq!(order["price"], 15.5);
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["email_client"], "ada@example.com");
    assert!(order["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_invalid_order_is_rejected_before_store() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    for body in [
        "product=Lamp&quantity=abc&price=1",
        "product=Lamp&quantity=0&price=1",
        "product=Lamp&quantity=1&price=-3",
        "product=&quantity=1&price=1",
        "quantity=1&price=1",
    ] {
        let response = place_order(&app, &cookie, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = body_to_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
    }

    let json = dashboard(&app, &cookie).await;
    assert!(products(&json).is_empty());
}

#[tokio::test]
async fn test_undecodable_order_body_is_json_bad_request() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    let wrong_type = Request::builder()
        .method("POST")
        .uri("/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(r#"{"product":"Lamp"}"#))
        .unwrap();

    for request in [
        wrong_type,
        form_post(
            "/orders",
            "product=Lamp&product=Desk&quantity=1&price=1",
            Some(&cookie),
        ),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_to_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
    }

    let json = dashboard(&app, &cookie).await;
    assert!(products(&json).is_empty());
}

#[tokio::test]
async fn test_dashboard_lists_every_users_orders() {
    let app = create_test_app().await;
    let ada = login(&app, "ada%40example.com").await;
    let bob = login(&app, "bob%40example.com").await;

    place_order(&app, &ada, "product=Lamp&quantity=1&price=10").await;
    place_order(&app, &bob, "product=Desk&quantity=1&price=90").await;

    let json = dashboard(&app, &ada).await;
    assert_eq!(products(&json), vec!["Lamp", "Desk"]);
    assert_eq!(json["orders"][1]["email_client"], "bob@example.com");
}

#[tokio::test]
async fn test_new_order_invalidates_cached_list() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    place_order(&app, &cookie, "product=A&quantity=1&price=1").await;

    // Miss then hit
    assert_eq!(products(&dashboard(&app, &cookie).await), vec!["A"]);
    assert_eq!(products(&dashboard(&app, &cookie).await), vec!["A"]);

    place_order(&app, &cookie, "product=B&quantity=1&price=1").await;
    assert_eq!(products(&dashboard(&app, &cookie).await), vec!["A", "B"]);

    let response = app.oneshot(get("/stats", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_to_json(response).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 2);
    assert_eq!(stats["stores"], 2);
    assert_eq!(stats["invalidations"], 2);
    assert_eq!(stats["backend_errors"], 0);
}

// == Misc Endpoints ==

#[tokio::test]
async fn test_sent_endpoint() {
    let app = create_test_app().await;
    let cookie = login(&app, "ada%40example.com").await;

    let response = app.oneshot(get("/sent", Some(&cookie))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "sent");
    assert_eq!(json["recipient"], "ada@example.com");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
