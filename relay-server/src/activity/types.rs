//! Log entry types, serialized as camelCase JSON for the debug endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forward::{ForwardError, ForwardResult};

/// What produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Inbound webhook delivery
    Webhook,
    /// Manual forward through the test endpoint
    Manual,
}

/// Outcome of forwarding one user ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedUser {
    pub user_id: String,
    pub event_type: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ForwardResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessedUser {
    /// Record a forward outcome. Transport errors are failures, any response is a success.
    pub fn from_outcome(
        user_id: &str,
        event_type: Option<&str>,
        outcome: Result<ForwardResult, ForwardError>,
    ) -> Self {
        let (success, response, error) = match outcome {
            Ok(result) => (true, Some(result), None),
            Err(e) => (false, None, Some(e.to_string())),
        };

        Self {
            user_id: user_id.to_string(),
            event_type: event_type.map(str::to_string),
            success,
            response,
            error,
        }
    }
}

/// One logged webhook delivery or manual forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    /// Raw event objects as received
    pub events: Vec<Value>,
    pub processed_users: Vec<ProcessedUser>,
}

/// Aggregate counts over the retained entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    pub total_entries: usize,
    pub unique_users: usize,
    pub total_forwards: usize,
    pub successful_forwards: usize,
    pub failed_forwards: usize,
}
