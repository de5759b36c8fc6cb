//! Text report rendering for analysis results.
//!
//! Pure presentation over an already-validated [`AnalysisResult`]; no
//! errors originate here. The report is returned as a `String` so tests
//! can assert on it without capturing stdout.

use std::collections::HashMap;
use std::fmt::Write;

use crate::models::{AnalysisResult, DivergenceFinding};

/// Texts at most this many characters long are printed whole in update logs.
const FULL_TEXT_LIMIT: usize = 60;
/// Head/tail window for truncated update texts.
const TRUNCATE_WINDOW: usize = 30;
/// Context window shown around a divergence.
const DIVERGENCE_CONTEXT: usize = 50;

/// First `limit` characters of `s`, char-boundary safe.
fn head(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Last `limit` characters of `s`, char-boundary safe.
fn tail(s: &str, limit: usize) -> &str {
    let char_count = s.chars().count();
    if char_count <= limit {
        return s;
    }
    match s.char_indices().nth(char_count - limit) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Render the full text report: per-part update logs with inline
/// divergence markers, the erasure summary, and the duplicate-part-id
/// section. Messages and parts appear in sorted order.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let findings_by_position: HashMap<(&str, &str, usize), &DivergenceFinding> = result
        .findings
        .iter()
        .map(|f| ((f.message_id.as_str(), f.part_id.as_str(), f.update_index), f))
        .collect();

    let _ = writeln!(out, "=== SSE MESSAGE PART ANALYSIS ===\n");

    for message_id in result.message_ids() {
        let _ = writeln!(out, "Message ID: {message_id}");

        for part_id in result.part_ids(message_id) {
            let Some(history) = result.history(message_id, part_id) else {
                continue;
            };

            let _ = writeln!(out, "  Part ID: {part_id}");
            let _ = writeln!(out, "  Number of updates: {}", history.len());

            for (index, update) in history.iter().enumerate() {
                let update_number = index + 1;
                let text = update.text.as_str();
                let _ = writeln!(
                    out,
                    "    Update {update_number}: type={}, length={}",
                    update.part_type.as_deref().unwrap_or("none"),
                    text.chars().count()
                );

                if let Some(finding) =
                    findings_by_position.get(&(message_id, part_id, update_number))
                {
                    write_divergence_marker(&mut out, finding);
                }

                if !text.is_empty() {
                    if text.chars().count() <= FULL_TEXT_LIMIT {
                        let _ = writeln!(out, "      Text: '{text}'");
                    } else {
                        let _ = writeln!(
                            out,
                            "      Text: '{}...{}'",
                            head(text, TRUNCATE_WINDOW),
                            tail(text, TRUNCATE_WINDOW)
                        );
                    }
                }
            }

            let _ = writeln!(out);
        }
    }

    write_summary(&mut out, result);
    write_duplicate_parts(&mut out, result);

    out
}

fn write_divergence_marker(out: &mut String, finding: &DivergenceFinding) {
    let _ = writeln!(out, "      ⚠️  CONTENT CHANGE DETECTED!");
    let _ = writeln!(
        out,
        "      Previous: '{}...' (len={})",
        head(&finding.previous_text, DIVERGENCE_CONTEXT),
        finding.previous_text.chars().count()
    );
    let _ = writeln!(
        out,
        "      Current:  '{}...' (len={})",
        head(&finding.current_text, DIVERGENCE_CONTEXT),
        finding.current_text.chars().count()
    );

    if !finding.common_prefix.is_empty() {
        let prefix_len = finding.common_prefix.chars().count();
        let _ = writeln!(
            out,
            "      Common prefix: '{}' (len={})",
            finding.common_prefix, prefix_len
        );
        let _ = writeln!(
            out,
            "      Divergence point: prev[{prefix_len}:] vs curr[{prefix_len}:]"
        );
    }
}

fn write_summary(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(out, "\n=== SUMMARY ===");

    if result.erasure_detected() {
        let _ = writeln!(out, "⚠️ CONTENT ERASURE/CHANGES DETECTED!");
        let _ = writeln!(
            out,
            "Found {} instances where content was not strictly additive:\n",
            result.findings.len()
        );

        for finding in &result.findings {
            let _ = writeln!(
                out,
                "  - Message {}, Part {}, Update {}",
                finding.message_id, finding.part_id, finding.update_index
            );
            let _ = writeln!(
                out,
                "    Previous ended with: '...{}'",
                tail(&finding.previous_text, DIVERGENCE_CONTEXT)
            );
            let _ = writeln!(
                out,
                "    Current starts with: '{}...'",
                head(&finding.current_text, DIVERGENCE_CONTEXT)
            );
            let _ = writeln!(out);
        }
    } else {
        let _ = writeln!(
            out,
            "✅ No content erasure detected - all updates are strictly additive"
        );
    }
}

fn write_duplicate_parts(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(out, "\n=== DUPLICATE PART ID ANALYSIS ===");

    for (message_id, part_ids) in result.duplicate_part_messages() {
        let _ = writeln!(
            out,
            "Message {} has {} different part IDs:",
            message_id,
            part_ids.len()
        );
        for part_id in part_ids {
            let _ = writeln!(out, "  - {part_id}");
        }
    }
}
