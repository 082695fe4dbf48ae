//! Outbound payload, result and error types for the forwarder.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action tag the script endpoint dispatches on.
pub const FORWARD_ACTION: &str = "updateLineId";

/// JSON body sent to the forward target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPayload {
    pub action: String,
    pub user_id: String,
    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
}

impl ForwardPayload {
    /// Build a payload for `user_id` stamped with `now`.
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            action: FORWARD_ACTION.to_string(),
            user_id: user_id.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Completed response from the forward target.
///
/// Any HTTP status lands here, 4xx and 5xx included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardResult {
    pub status: u16,
    pub body: String,
}

/// Errors raised while building or using a forwarder.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid forward url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported forward url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect or TLS failure before a response arrived.
    #[error("request to forward target failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The connection dropped while the response body was being read.
    #[error("failed to read forward target response: {0}")]
    Body(#[source] reqwest::Error),
}
