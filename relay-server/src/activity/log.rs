//! Shared, bounded activity log.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::types::{EntryKind, LogEntry, LogStats, ProcessedUser};

/// Maximum number of entries retained.
pub const MAX_LOG_ENTRIES: usize = 50;

/// Cloneable handle to the process-wide activity log.
///
/// Appends are serialized by the lock, so entries land in the order each
/// request finishes its forwarding loop.
#[derive(Clone, Default)]
pub struct ActivityLog {
    inner: Arc<RwLock<LogInner>>,
}

#[derive(Default)]
struct LogInner {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry, evicting the oldest if the log is full.
    pub async fn record(
        &self,
        kind: EntryKind,
        events: Vec<Value>,
        processed_users: Vec<ProcessedUser>,
    ) -> LogEntry {
        let mut inner = self.inner.write().await;

        inner.next_id += 1;
        let entry = LogEntry {
            id: inner.next_id,
            timestamp: Utc::now(),
            kind,
            events,
            processed_users,
        };

        inner.entries.push_back(entry.clone());
        while inner.entries.len() > MAX_LOG_ENTRIES {
            if let Some(evicted) = inner.entries.pop_front() {
                debug!(entry_id = evicted.id, "activity_entry_evicted");
            }
        }

        debug!(
            entry_id = entry.id,
            retained = inner.entries.len(),
            "activity_entry_recorded"
        );

        entry
    }

    /// Up to `limit` entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let inner = self.inner.read().await;
        inner.entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Drop every entry and return how many were removed.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let cleared = inner.entries.len();
        inner.entries.clear();

        info!(cleared = cleared, "activity_log_cleared");

        cleared
    }

    /// Aggregate counts over the retained entries.
    pub async fn stats(&self) -> LogStats {
        let inner = self.inner.read().await;

        let mut users = HashSet::new();
        let mut stats = LogStats {
            total_entries: inner.entries.len(),
            ..LogStats::default()
        };

        for processed in inner.entries.iter().flat_map(|e| &e.processed_users) {
            users.insert(processed.user_id.as_str());
            stats.total_forwards += 1;
            if processed.success {
                stats.successful_forwards += 1;
            } else {
                stats.failed_forwards += 1;
            }
        }

        stats.unique_users = users.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::ForwardResult;
    use serde_json::json;

    fn user(id: &str, success: bool) -> ProcessedUser {
        ProcessedUser {
            user_id: id.to_string(),
            event_type: Some("message".to_string()),
            success,
            response: success.then(|| ForwardResult { status: 200, body: "ok".to_string() }),
            error: (!success).then(|| "boom".to_string()),
        }
    }

    #[tokio::test]
    async fn test_log_is_bounded_fifo() {
        let log = ActivityLog::new();

        for i in 0..60 {
            log.record(EntryKind::Webhook, vec![json!({ "seq": i })], vec![]).await;
        }

        assert_eq!(log.len().await, MAX_LOG_ENTRIES);

        let entries = log.recent(MAX_LOG_ENTRIES).await;
        let seqs: Vec<i64> = entries
            .iter()
            .rev()
            .map(|e| e.events[0]["seq"].as_i64().unwrap())
            .collect();
        let expected: Vec<i64> = (10..60).collect();
        assert_eq!(seqs, expected);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let log = ActivityLog::new();
        for _ in 0..5 {
            log.record(EntryKind::Webhook, vec![], vec![]).await;
        }

        let ids: Vec<u64> = log.recent(3).await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[tokio::test]
    async fn test_clear_returns_count_and_ids_keep_increasing() {
        let log = ActivityLog::new();
        log.record(EntryKind::Webhook, vec![], vec![]).await;
        log.record(EntryKind::Manual, vec![], vec![]).await;

        assert_eq!(log.clear().await, 2);
        assert!(log.is_empty().await);
        assert_eq!(log.clear().await, 0);

        let entry = log.record(EntryKind::Webhook, vec![], vec![]).await;
        assert_eq!(entry.id, 3);
    }

    #[tokio::test]
    async fn test_stats_counts_unique_users() {
        let log = ActivityLog::new();
        log.record(EntryKind::Webhook, vec![], vec![user("U1", true), user("U2", false)])
            .await;
        log.record(EntryKind::Manual, vec![], vec![user("U1", true)]).await;

        let stats = log.stats().await;
        assert_eq!(
            stats,
            LogStats {
                total_entries: 2,
                unique_users: 2,
                total_forwards: 3,
                successful_forwards: 2,
                failed_forwards: 1,
            }
        );
    }
}
