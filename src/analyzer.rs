//! Additivity analysis over part-update sequences.
//!
//! The server contract for streamed parts is append-only growth: each
//! `message.part.updated` event carries the full text so far, and every new
//! version must start with the previous one. This module sequences the
//! projected events per `(message, part)` pair and walks each history
//! pairwise, recording a [`DivergenceFinding`] for every step that rewrites
//! already-emitted content.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{AnalysisResult, DivergenceFinding, PartHistory, PartUpdateEvent};
use crate::sse;

/// Fatal analysis errors. Per-line defects are skipped, never surfaced
/// here; only a total inability to read the input aborts a run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read log: {0}")]
    Io(#[from] std::io::Error),
}

/// Longest common prefix of two strings, scanned character by character
/// until the first mismatch or the end of the shorter string.
pub fn common_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

/// Group projected events into per-part histories, keyed by message id then
/// part id, preserving arrival order.
///
/// Append-only aggregation: no reordering, no deduplication. A repeated
/// identical update is recorded as a distinct entry, since it is itself
/// evidence about server behavior.
pub fn sequence_updates<I>(events: I) -> HashMap<String, HashMap<String, PartHistory>>
where
    I: IntoIterator<Item = PartUpdateEvent>,
{
    let mut parts_by_message: HashMap<String, HashMap<String, PartHistory>> = HashMap::new();
    for event in events {
        parts_by_message
            .entry(event.message_id.clone())
            .or_default()
            .entry(event.part_id.clone())
            .or_default()
            .push(event);
    }
    parts_by_message
}

/// Walk one history pairwise and report every non-additive step.
///
/// The baseline starts empty and always advances to the current text,
/// violating or not: comparison is against the immediately preceding
/// observed text, not the last good one, so a cascading rewrite yields one
/// finding per step. Comparisons where either side is empty are skipped;
/// an empty previous means this is the first real content, not a
/// regression.
pub fn scan_history(
    message_id: &str,
    part_id: &str,
    history: &[PartUpdateEvent],
) -> Vec<DivergenceFinding> {
    let mut findings = Vec::new();
    let mut previous_text = "";

    for (index, update) in history.iter().enumerate() {
        let text = update.text.as_str();

        if !previous_text.is_empty() && !text.is_empty() && !text.starts_with(previous_text) {
            findings.push(DivergenceFinding {
                message_id: message_id.to_string(),
                part_id: part_id.to_string(),
                update_index: index + 1,
                previous_text: previous_text.to_string(),
                current_text: text.to_string(),
                common_prefix: common_prefix(previous_text, text),
            });
        }

        previous_text = text;
    }

    findings
}

/// Scan every history, messages then parts in sorted order, so findings
/// come out deterministically.
fn scan_all(parts_by_message: &HashMap<String, HashMap<String, PartHistory>>) -> Vec<DivergenceFinding> {
    let mut findings = Vec::new();

    let mut message_ids: Vec<&String> = parts_by_message.keys().collect();
    message_ids.sort_unstable();

    for message_id in message_ids {
        let parts = &parts_by_message[message_id];
        let mut part_ids: Vec<&String> = parts.keys().collect();
        part_ids.sort_unstable();

        for part_id in part_ids {
            findings.extend(scan_history(message_id, part_id, &parts[part_id]));
        }
    }

    findings
}

/// Run the full pipeline over any line source: extract payloads, project
/// part updates, sequence them, and scan for divergences.
pub fn analyze_reader<R: BufRead>(reader: R) -> Result<AnalysisResult, AnalyzeError> {
    let mut events: Vec<PartUpdateEvent> = Vec::new();
    let mut line_count = 0usize;

    for line in reader.lines() {
        let line = line?;
        line_count += 1;

        if let Some(payload) = sse::extract_payload(&line) {
            if let Some(event) = sse::parse_part_update(payload) {
                events.push(event);
            }
        }
    }

    debug!(lines = line_count, updates = events.len(), "log scan complete");

    let parts_by_message = sequence_updates(events);
    let findings = scan_all(&parts_by_message);

    info!(
        messages = parts_by_message.len(),
        findings = findings.len(),
        "additivity analysis complete"
    );

    Ok(AnalysisResult {
        parts_by_message,
        findings,
    })
}

/// Analyze a log file on disk.
///
/// Any I/O failure is fatal and yields no partial result.
pub fn analyze_log(path: impl AsRef<Path>) -> Result<AnalysisResult, AnalyzeError> {
    let file = File::open(path.as_ref())?;
    analyze_reader(BufReader::new(file))
}
