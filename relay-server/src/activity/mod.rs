//! Bounded in-memory record of recent relay activity.
//!
//! Nothing here survives a restart. The log keeps the most recent
//! [`MAX_LOG_ENTRIES`] entries and evicts the oldest first.

pub mod log;
pub mod types;

pub use log::{ActivityLog, MAX_LOG_ENTRIES};
pub use types::{EntryKind, LogEntry, LogStats, ProcessedUser};
