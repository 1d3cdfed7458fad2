#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use faircms_api::auth::jwt::JwtConfig;
use faircms_api::config::ServerConfig;
use faircms_api::router::build_app_router;
use faircms_api::state::AppState;
use faircms_events::EventBus;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const REVIEWERS_EMAIL: &str = "reviewers@fair.example.com";

/// An identity sent through the mock-auth headers.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub email: &'static str,
    pub role: &'static str,
}

pub const AUTHOR: Actor = Actor {
    email: "author@fair.example.com",
    role: "author",
};
pub const REVIEWER: Actor = Actor {
    email: "reviewer@fair.example.com",
    role: "reviewer",
};
pub const ADMIN: Actor = Actor {
    email: "admin@fair.example.com",
    role: "admin",
};
/// Reads the shared review-queue inbox.
pub const REVIEW_QUEUE: Actor = Actor {
    email: REVIEWERS_EMAIL,
    role: "reviewer",
};

/// Build a test `ServerConfig` with safe defaults and mock auth enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_mins: 60,
        },
        allow_mock_auth: true,
        reviewers_email: REVIEWERS_EMAIL.to_string(),
        cache_purge_url: None,
        public_cache_ttl_secs: 300,
        search_index_webhook_url: None,
    }
}

/// Build the application router exactly as `main.rs` does, with no email
/// delivery and a fresh event bus.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), None, event_bus)
        .expect("state without purge URL always builds");
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, actor: Option<Actor>) -> axum::http::request::Builder {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        b = b
            .header("x-mock-user-email", actor.email)
            .header("x-mock-user-role", actor.role);
    }
    b
}

/// Anonymous GET.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_as(app: &Router, uri: &str, actor: Actor) -> Response<Body> {
    send(app, builder(Method::GET, uri, Some(actor)).body(Body::empty()).unwrap()).await
}

pub async fn post_as(app: &Router, uri: &str, actor: Actor) -> Response<Body> {
    send(app, builder(Method::POST, uri, Some(actor)).body(Body::empty()).unwrap()).await
}

pub async fn post_json_as(
    app: &Router,
    uri: &str,
    actor: Actor,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(Method::POST, uri, Some(actor))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_as(
    app: &Router,
    uri: &str,
    actor: Actor,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(Method::PUT, uri, Some(actor))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_as(app: &Router, uri: &str, actor: Actor) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, Some(actor)).body(Body::empty()).unwrap()).await
}

/// GET with an explicit `Authorization` header value.
pub async fn get_with_authorization(app: &Router, uri: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Workflow shortcuts
// ---------------------------------------------------------------------------

/// Create an entry as `actor` and return `(entry_id, version_id)`.
pub async fn create_faq(app: &Router, actor: Actor, body: serde_json::Value) -> (i64, i64) {
    let response = post_json_as(app, "/api/admin/faq", actor, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["entry"]["id"].as_i64().unwrap(),
        json["data"]["version"]["id"].as_i64().unwrap(),
    )
}

/// Create, submit and approve an entry. Returns `(entry_id, version_id)`.
pub async fn publish_faq(app: &Router, slug: &str, question: &str, answer: &str) -> (i64, i64) {
    let (entry_id, version_id) = create_faq(
        app,
        AUTHOR,
        serde_json::json!({"slug": slug, "question": question, "answer": answer}),
    )
    .await;
    let r = post_as(app, &format!("/api/admin/faq/version/{version_id}/submit"), AUTHOR).await;
    assert_eq!(r.status(), axum::http::StatusCode::OK);
    let r = post_as(app, &format!("/api/admin/faq/version/{version_id}/approve"), REVIEWER).await;
    assert_eq!(r.status(), axum::http::StatusCode::OK);
    (entry_id, version_id)
}
