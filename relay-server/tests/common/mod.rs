//! Shared helpers for driving the relay router in tests.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use line_relay::{create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

/// Path the mock forward target listens on.
pub const FORWARD_PATH: &str = "/macros/exec";

/// Router forwarding to `url`.
pub fn relay_with_url(url: &str) -> Router {
    let state = AppState::new(Config::with_forward_url(url)).expect("valid forward url");
    create_router(state)
}

/// Router forwarding to the given mock server.
pub fn relay_for(server: &MockServer) -> Router {
    relay_with_url(&format!("{}{}", server.uri(), FORWARD_PATH))
}

/// Router whose forward target refuses connections.
pub fn relay_unreachable() -> Router {
    relay_with_url("http://127.0.0.1:1/exec")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response should be valid JSON")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response should be UTF-8")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("failed to make request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");

    TestResponse { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> TestResponse {
    post_raw(app, uri, body.to_string()).await
}

/// Webhook body with one `message` event per user ID.
pub fn webhook_body(user_ids: &[&str]) -> Value {
    let events: Vec<Value> = user_ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "type": "message",
                "source": { "type": "user", "userId": id }
            })
        })
        .collect();
    serde_json::json!({ "destination": "Ubot", "events": events })
}

/// User IDs of the requests the mock target received, in arrival order.
pub async fn forwarded_user_ids(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|req| {
            let body: Value = serde_json::from_slice(&req.body).expect("forward body is JSON");
            body["userId"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}
