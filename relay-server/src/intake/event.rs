//! Webhook body and event extraction.

use serde::Deserialize;
use serde_json::Value;

/// A parsed webhook delivery.
#[derive(Debug, Clone, Default)]
pub struct WebhookBatch {
    /// Event objects exactly as received, kept for the activity log
    pub raw_events: Vec<Value>,
    /// Extracted view of each raw event, same order
    pub events: Vec<Event>,
}

/// The fields the relay cares about in one webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub event_type: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
struct EventFields {
    #[serde(rename = "type")]
    event_type: Option<Value>,
    source: Option<SourceFields>,
}

#[derive(Deserialize)]
struct SourceFields {
    #[serde(rename = "userId")]
    user_id: Option<Value>,
}

impl Event {
    /// Extract type and `source.userId` from a raw event.
    ///
    /// Non-string or empty values count as absent.
    pub fn from_value(raw: &Value) -> Self {
        let fields = match EventFields::deserialize(raw) {
            Ok(fields) => fields,
            Err(_) => return Self::default(),
        };

        let event_type = fields.event_type.as_ref().and_then(non_empty_str);
        let user_id = fields
            .source
            .as_ref()
            .and_then(|s| s.user_id.as_ref())
            .and_then(non_empty_str);

        Self { event_type, user_id }
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a webhook body.
///
/// Malformed JSON is an error. A missing or non-array `events` field gives an
/// empty batch.
pub fn parse_webhook(body: &[u8]) -> Result<WebhookBatch, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;

    let raw_events = match value.get("events") {
        Some(Value::Array(events)) => events.clone(),
        _ => Vec::new(),
    };
    let events = raw_events.iter().map(Event::from_value).collect();

    Ok(WebhookBatch { raw_events, events })
}
