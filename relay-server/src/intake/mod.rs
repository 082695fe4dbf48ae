//! Webhook intake: parse a delivery, then forward each user ID in order.
//!
//! ## Processing Flow
//!
//! ```text
//! body → parse_webhook() → [Event] → forward_events() → [ProcessedUser]
//! ```

pub mod event;

use tracing::{info, warn};

use crate::activity::ProcessedUser;
use crate::forward::Forward;

pub use event::{parse_webhook, Event, WebhookBatch};

/// Forward every event that carries a user ID, one at a time.
///
/// Each call is awaited before the next begins. A failed forward is recorded
/// and does not stop the remaining events. Events without a user ID are
/// skipped and leave no record.
pub async fn forward_events<F: Forward>(forwarder: &F, events: &[Event]) -> Vec<ProcessedUser> {
    let mut processed = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let Some(user_id) = event.user_id.as_deref() else {
            info!(
                event_index = index,
                event_type = ?event.event_type,
                "webhook_event_skipped_no_user_id"
            );
            continue;
        };

        info!(event_index = index, user_id = %user_id, "webhook_user_id_found");

        let outcome = forwarder.forward(user_id).await;
        if let Err(e) = &outcome {
            warn!(user_id = %user_id, error = %e, "webhook_forward_failed");
        }

        processed.push(ProcessedUser::from_outcome(
            user_id,
            event.event_type.as_deref(),
            outcome,
        ));
    }

    processed
}
