//! Field extraction from enriched records.
//!
//! Everything here reads through [`decode_nested`] first, since the platform
//! delivers `inputs`/`outputs`/`process_data` either structured or as
//! JSON-encoded strings.

use flowlog_core::{decode_nested, EnrichedLog};
use serde_json::Value;

/// One knowledge-base passage cited by a retrieval node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    pub dataset: String,
    pub document: String,
    pub text: String,
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

/// Coerce a price-like value to f64: numbers pass through, numeric strings
/// are parsed, anything else counts as zero.
pub(crate) fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Run-detail inputs with nested JSON strings decoded.
pub(crate) fn decoded_inputs(log: &EnrichedLog) -> Option<Value> {
    log.workflow_run_detail
        .as_ref()
        .and_then(|detail| detail.inputs.clone())
        .map(decode_nested)
}

/// Run-detail outputs with nested JSON strings decoded.
pub(crate) fn decoded_outputs(log: &EnrichedLog) -> Option<Value> {
    log.workflow_run_detail
        .as_ref()
        .and_then(|detail| detail.outputs.clone())
        .map(decode_nested)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The user identity behind a record: end-user session id, else account
/// email, else a `sys.user_id` recoverable from the run-detail inputs
/// (flat `"sys.user_id"` key first, then nested `sys.user_id`).
pub(crate) fn resolve_user_id(log: &EnrichedLog) -> Option<String> {
    if let Some(end_user) = &log.record.created_by_end_user {
        if let Some(session_id) = &end_user.session_id {
            return Some(session_id.clone());
        }
    }
    if let Some(account) = &log.record.created_by_account {
        if let Some(email) = &account.email {
            return Some(email.clone());
        }
    }
    let inputs = decoded_inputs(log)?;
    inputs
        .get("sys.user_id")
        .or_else(|| inputs.get("sys").and_then(|sys| sys.get("user_id")))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// The conversation/session identity of a record: end-user session id when
/// present, else the workflow run id, else the log id.
pub(crate) fn resolve_session_id(log: &EnrichedLog) -> Option<String> {
    if let Some(end_user) = &log.record.created_by_end_user {
        if let Some(session_id) = &end_user.session_id {
            return Some(session_id.clone());
        }
    }
    if let Some(run_id) = log.record.workflow_run_id() {
        return Some(run_id.to_string());
    }
    if log.record.id.is_empty() {
        None
    } else {
        Some(log.record.id.clone())
    }
}

/// The user query: `inputs.query`, else `inputs["sys.query"]`.
pub(crate) fn resolve_query(log: &EnrichedLog) -> String {
    let Some(inputs) = decoded_inputs(log) else {
        return String::new();
    };
    inputs
        .get("query")
        .or_else(|| inputs.get("sys.query"))
        .map(value_to_text)
        .unwrap_or_default()
}

/// The AI answer: `outputs.text`.
pub(crate) fn resolve_answer(log: &EnrichedLog) -> String {
    decoded_outputs(log)
        .as_ref()
        .and_then(|outputs| outputs.get("text"))
        .map(value_to_text)
        .unwrap_or_default()
}

/// Attachment file names from `inputs["sys.files"]` (flat key or nested).
pub(crate) fn attachment_names(log: &EnrichedLog) -> Vec<String> {
    let Some(inputs) = decoded_inputs(log) else {
        return Vec::new();
    };
    let files = inputs
        .get("sys.files")
        .or_else(|| inputs.get("sys").and_then(|sys| sys.get("files")))
        .and_then(Value::as_array);
    let Some(files) = files else {
        return Vec::new();
    };
    files
        .iter()
        .filter_map(|file| {
            file.get("name")
                .or_else(|| file.get("filename"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .collect()
}

/// Every knowledge-base passage cited by this record's retrieval nodes, in
/// retrieval order, with no deduplication.
///
/// Segment text carries the similarity score to four decimals followed by
/// the passage content truncated to 200 characters.
pub(crate) fn collect_segments(log: &EnrichedLog) -> Vec<Segment> {
    let mut segments = Vec::new();

    for node in log.nodes() {
        if !node.is_knowledge_retrieval() {
            continue;
        }
        let Some(outputs) = node.outputs.clone().map(decode_nested) else {
            continue;
        };
        let Some(results) = outputs.get("result").and_then(Value::as_array) else {
            continue;
        };

        for item in results {
            let Some(metadata) = item.get("metadata").filter(|m| m.is_object()) else {
                continue;
            };
            let content = item.get("content").and_then(Value::as_str).unwrap_or("");
            if content.is_empty() {
                continue;
            }
            let dataset = metadata
                .get("dataset_name")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let document = metadata
                .get("document_name")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let score = metadata.get("score").map(coerce_number).unwrap_or(0.0);

            segments.push(Segment {
                dataset,
                document,
                text: format!("similarity:{:.4}\n{}", score, truncate_chars(content, 200)),
            });
        }
    }

    segments
}

/// Accumulated LLM cost for this record: the sum of
/// `process_data.usage.total_price` over every `llm` node.
pub(crate) fn llm_cost(log: &EnrichedLog) -> f64 {
    log.nodes()
        .iter()
        .filter(|node| node.is_llm())
        .filter_map(|node| node.process_data.clone().map(decode_nested))
        .filter_map(|process_data| {
            process_data
                .get("usage")
                .and_then(|usage| usage.get("total_price"))
                .map(coerce_number)
        })
        .sum()
}
