//! Data model for SSE part-update analysis.
//!
//! All entities are built fresh for a single log scan and discarded after
//! the report is rendered; nothing here persists across runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single `message.part.updated` event projected out of the log.
///
/// Events missing either identifier are dropped at projection time and
/// never reach the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartUpdateEvent {
    /// Identifier of the owning message
    pub message_id: String,
    /// Identifier of the part within the message
    pub part_id: String,
    /// Part type as reported by the server (informational only)
    #[serde(default)]
    pub part_type: Option<String>,
    /// Full text of this version of the part; may be empty
    #[serde(default)]
    pub text: String,
}

/// Ordered updates for one `(message_id, part_id)` pair, in log order.
///
/// The log is trusted as ordered: arrival order is taken to be the true
/// temporal order of emission.
pub type PartHistory = Vec<PartUpdateEvent>;

/// A violation of the append-only invariant between two adjacent updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceFinding {
    pub message_id: String,
    pub part_id: String,
    /// 1-based position of the offending update within its part history
    pub update_index: usize,
    /// Full text of the update preceding the divergence
    pub previous_text: String,
    /// Full text of the diverging update
    pub current_text: String,
    /// Longest common prefix of the two texts; empty when they disagree
    /// from the first character
    pub common_prefix: String,
}

/// Complete output of one log scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Histories keyed by message id, then part id
    pub parts_by_message: HashMap<String, HashMap<String, PartHistory>>,
    /// Divergences in discovery order: messages sorted, then parts sorted,
    /// then update index
    pub findings: Vec<DivergenceFinding>,
}

impl AnalysisResult {
    /// True iff at least one non-additive update was found.
    pub fn erasure_detected(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Message ids, sorted for deterministic reporting.
    pub fn message_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.parts_by_message.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Part ids of one message, sorted. Empty if the message is unknown.
    pub fn part_ids(&self, message_id: &str) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .parts_by_message
            .get(message_id)
            .map(|parts| parts.keys().map(String::as_str).collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// History of one part, if any updates were recorded for it.
    pub fn history(&self, message_id: &str, part_id: &str) -> Option<&PartHistory> {
        self.parts_by_message.get(message_id)?.get(part_id)
    }

    /// Number of updates recorded for one part.
    pub fn update_count(&self, message_id: &str, part_id: &str) -> usize {
        self.history(message_id, part_id).map(Vec::len).unwrap_or(0)
    }

    /// Messages owning more than one distinct part id, with their part id
    /// lists. Informational: some protocols legitimately stream several
    /// parts per message.
    pub fn duplicate_part_messages(&self) -> Vec<(&str, Vec<&str>)> {
        let mut duplicates: Vec<(&str, Vec<&str>)> = self
            .parts_by_message
            .iter()
            .filter(|(_, parts)| parts.len() > 1)
            .map(|(message_id, _)| (message_id.as_str(), self.part_ids(message_id)))
            .collect();
        duplicates.sort_unstable_by_key(|(message_id, _)| *message_id);
        duplicates
    }
}
