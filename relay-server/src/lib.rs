//! LINE Relay - forwards LINE webhook user IDs to a script endpoint.
//!
//! ## Architecture
//!
//! ```text
//! LINE webhook → Intake → Forwarder → script endpoint
//!                   ↓
//!             Activity log → /data, /test-form
//! ```

pub mod activity;
pub mod config;
pub mod forward;
pub mod intake;
pub mod web;

// Re-export commonly used types
pub use activity::{ActivityLog, EntryKind, LogEntry, LogStats, ProcessedUser, MAX_LOG_ENTRIES};
pub use config::Config;
pub use forward::{Forward, ForwardError, ForwardPayload, ForwardResult, Forwarder};
pub use intake::{forward_events, parse_webhook, Event, WebhookBatch};
pub use web::{create_router, AppError, AppState};
