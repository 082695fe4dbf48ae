//! Endpoint handlers for the relay.
//!
//! The webhook handler forwards every user ID before it answers, so a slow
//! forward target delays the acknowledgement. The acknowledgement itself is
//! always `200 OK` once the body parses, whatever the forwards returned.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::activity::{ActivityLog, EntryKind, LogEntry, LogStats, ProcessedUser, MAX_LOG_ENTRIES};
use crate::forward::{Forward, ForwardError, ForwardResult, Forwarder};
use crate::intake::{forward_events, parse_webhook};
use crate::web::error::AppError;
use crate::Config;

/// Every route the relay serves, reported by the 404 handler.
pub const ROUTES: &[&str] = &[
    "GET /",
    "POST /line-webhook",
    "POST /test-userid",
    "GET /data",
    "DELETE /data",
    "GET /health",
    "GET /test-form",
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
    pub log: ActivityLog,
    pub started_at: Instant,
}

impl AppState {
    /// Build state from configuration. Fails if the forward URL is unusable.
    pub fn new(config: Config) -> Result<Self, ForwardError> {
        let forwarder = Forwarder::new(&config.forward_url)?;

        Ok(Self {
            config: Arc::new(config),
            forwarder,
            log: ActivityLog::new(),
            started_at: Instant::now(),
        })
    }
}

// =============================================================================
// Home & Health
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub forward_url_configured: bool,
    pub stats: LogStats,
}

/// Status summary.
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        status: "LINE Bot Running",
        message: "Simple LINE ID Collector",
        timestamp: Utc::now(),
        forward_url_configured: state.config.forward_url_configured,
        stats: state.log.stats().await,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub log_entries: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        log_entries: state.log.len().await,
    })
}

// =============================================================================
// LINE Webhook
// =============================================================================

/// LINE webhook endpoint.
///
/// This endpoint:
/// 1. Parses the JSON body (400 if malformed)
/// 2. Forwards each event's `source.userId`, one at a time
/// 3. Records the delivery in the activity log
/// 4. Returns a plaintext `OK`
pub async fn line_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    info!(body_length = body.len(), "line_webhook_received");

    let batch = parse_webhook(&body).map_err(|e| {
        warn!(error = %e, "line_webhook_invalid_json");
        AppError::from(e)
    })?;

    let processed = forward_events(&state.forwarder, &batch.events).await;

    let event_count = batch.raw_events.len();
    let entry = state
        .log
        .record(EntryKind::Webhook, batch.raw_events, processed)
        .await;

    info!(
        entry_id = entry.id,
        events = event_count,
        forwarded = entry.processed_users.len(),
        failed = entry.processed_users.iter().filter(|p| !p.success).count(),
        "line_webhook_processed"
    );

    Ok((StatusCode::OK, "OK"))
}

// =============================================================================
// Manual Forward
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TestUserIdRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestUserIdResponse {
    pub success: bool,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ForwardResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Forward a single user ID supplied in the request body.
pub async fn test_user_id(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TestUserIdResponse>, AppError> {
    let request: TestUserIdRequest = serde_json::from_slice(&body)?;

    let user_id = request
        .user_id
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingUserId)?
        .to_string();

    info!(user_id = %user_id, "manual_forward_requested");

    let outcome = state.forwarder.forward(&user_id).await;
    let processed = ProcessedUser::from_outcome(&user_id, None, outcome);

    state
        .log
        .record(EntryKind::Manual, Vec::new(), vec![processed.clone()])
        .await;

    Ok(Json(TestUserIdResponse {
        success: processed.success,
        user_id: processed.user_id,
        response: processed.response,
        error: processed.error,
    }))
}

// =============================================================================
// Activity Data
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct DataResponse {
    pub entries: Vec<LogEntry>,
    pub count: usize,
    pub stats: LogStats,
}

/// Recent log entries, newest first, with aggregate stats.
pub async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Json<DataResponse> {
    let limit = query.limit.unwrap_or(MAX_LOG_ENTRIES).min(MAX_LOG_ENTRIES);
    let entries = state.log.recent(limit).await;

    Json(DataResponse {
        count: entries.len(),
        entries,
        stats: state.log.stats().await,
    })
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    pub cleared: usize,
}

/// Empty the activity log.
pub async fn clear_data(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.log.clear().await;

    Json(ClearResponse {
        message: "Log cleared",
        cleared,
    })
}

// =============================================================================
// Debug Console & Fallback
// =============================================================================

/// Static HTML console for poking at the endpoints from a browser.
pub async fn test_form() -> Html<&'static str> {
    Html(include_str!("test_form.html"))
}

#[derive(Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub method: String,
    pub path: String,
    pub routes: &'static [&'static str],
}

/// 404 for unknown paths and unsupported methods.
pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    info!(method = %method, path = %uri.path(), "route_not_found");

    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Not Found",
            method: method.to_string(),
            path: uri.path().to_string(),
            routes: ROUTES,
        }),
    )
}
