//! SSE payload extraction and part-update projection.
//!
//! Lines of interest embed an SSE data frame behind the literal
//! `SSE line: data: ` marker, preceded by arbitrary logger prefix
//! (timestamp, level, module path). Everything after the marker to the end
//! of the line is a JSON payload. Only `message.part.updated` events are
//! projected; every other payload, well-formed or not, is skipped without
//! error so that one bad line cannot poison the rest of the scan.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::models::PartUpdateEvent;

/// Event type emitted by the server for incremental part text updates.
pub const PART_UPDATED_EVENT: &str = "message.part.updated";

/// Matches the SSE data marker anywhere in a log line and captures the
/// payload to end of line.
static SSE_DATA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SSE line: data: (.+)").expect("Invalid SSE data regex"));

/// Extract the JSON payload from a log line, if it carries an SSE data frame.
///
/// Matching is a substring search, not full-line anchoring; non-matching
/// lines yield `None` and never fail.
pub fn extract_payload(line: &str) -> Option<&str> {
    SSE_DATA_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Envelope of a server event payload.
///
/// Only `type` and `properties.part` are consumed; all other fields are
/// ignored so unexpected additions on the wire cannot cause failures.
#[derive(Debug, Clone, Deserialize)]
struct EventEnvelope {
    #[serde(default, rename = "type")]
    event_type: Option<String>,
    #[serde(default)]
    properties: EventProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EventProperties {
    #[serde(default)]
    part: PartPayload,
}

/// The `part` object nested in a part-update event.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartPayload {
    #[serde(default, rename = "messageID")]
    message_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    part_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Parse a payload string into a part-update event.
///
/// Returns `None` for anything that is not a well-formed part update:
/// invalid JSON, a different event type, or a part missing either
/// `messageID` or `id`. Skips are logged at debug/trace level, never
/// surfaced as errors.
pub fn parse_part_update(payload: &str) -> Option<PartUpdateEvent> {
    let envelope: EventEnvelope = match serde_json::from_str(payload) {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(%err, "skipping unparseable SSE payload");
            return None;
        }
    };

    if envelope.event_type.as_deref() != Some(PART_UPDATED_EVENT) {
        trace!(event_type = ?envelope.event_type, "ignoring non part-update event");
        return None;
    }

    let part = envelope.properties.part;
    let message_id = part.message_id.unwrap_or_default();
    let part_id = part.id.unwrap_or_default();

    // Without both identifiers the update cannot be grouped
    if message_id.is_empty() || part_id.is_empty() {
        debug!("skipping part update without message/part identifiers");
        return None;
    }

    Some(PartUpdateEvent {
        message_id,
        part_id,
        part_type: part.part_type,
        text: part.text.unwrap_or_default(),
    })
}
