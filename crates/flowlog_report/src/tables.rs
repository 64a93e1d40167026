//! Row-oriented table derivation from the enriched payload.

use crate::extract::{
    attachment_names, collect_segments, llm_cost, resolve_answer, resolve_query,
    resolve_session_id, resolve_user_id, truncate_chars,
};
use crate::time::{format_date, format_timestamp, local_date};
use chrono::NaiveDate;
use flowlog_core::{EnrichedLog, LogReport};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Answers longer than this are cut off in the question/answer export.
const MAX_ANSWER_CHARS: usize = 5_000;

/// The question/answer export always carries at least this many segment
/// columns, even when no row reaches the count.
const MIN_SEGMENT_COLUMNS: usize = 3;

/// The single-row aggregate summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverviewRow {
    /// Earliest record date, local time
    pub start_date: String,
    /// Latest record date, local time
    pub end_date: String,
    /// Total record count
    pub total_messages: u64,
    /// Distinct user count
    pub total_users: u64,
    /// Distinct session count
    pub total_sessions: u64,
    /// Messages per session, 0 when no sessions
    pub avg_session_interactions: f64,
    /// Token throughput: total tokens / total run time, 0 when no run time
    pub token_throughput: f64,
    /// Placeholder; no data source feeds it
    pub satisfaction: String,
    /// Accumulated LLM cost across all runs
    pub total_cost: f64,
}

/// Record count for one local calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCount {
    /// Local calendar date
    pub date: NaiveDate,
    /// Records created on that date
    pub count: u64,
}

/// Per-user activity statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStat {
    /// Resolved user identity
    pub user_id: String,
    /// Records attributed to this user
    pub message_count: u64,
    /// Distinct local dates with activity
    pub active_days: u64,
    /// First-seen date, local time
    pub first_seen: String,
    /// Last-seen date, local time
    pub last_seen: String,
}

/// One line of the question/answer export.
///
/// Keyed by (record sequence, knowledge base, document) when citations
/// exist, else one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct QaRow {
    /// 1-based record sequence number
    pub sequence: usize,
    /// Resolved user identity
    pub user_id: String,
    /// Resolved session identity
    pub session_id: String,
    /// 1-based position of this question within its session
    pub question_order: usize,
    /// User query
    pub query: String,
    /// Attachment names, `; `-joined
    pub attachments: String,
    /// AI answer, truncated
    pub answer: String,
    /// Knowledge base name for this row's citation group
    pub dataset_name: String,
    /// Document name for this row's citation group
    pub document_name: String,
    /// Segment texts belonging to this citation group, in retrieval order
    pub segments: Vec<String>,
    /// Record creation time, formatted
    pub created_at: String,
}

/// The question/answer export with its computed column width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QaTable {
    /// All rows, ordered by record sequence
    pub rows: Vec<QaRow>,
    /// Segment column count: the maximum across rows, floor 3
    pub segment_columns: usize,
}

/// The four independent tables derived from one enriched payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTables {
    /// Aggregate summary
    pub overview: OverviewRow,
    /// Per-date record counts, ascending
    pub daily: Vec<DailyCount>,
    /// Per-user statistics, descending by message count
    pub users: Vec<UserStat>,
    /// Question/answer export
    pub qa: QaTable,
}

#[derive(Debug, Default)]
struct UserAcc {
    message_count: u64,
    days: IndexSet<NaiveDate>,
    first_seen: Option<f64>,
    last_seen: Option<f64>,
}

impl ReportTables {
    /// Derives all four tables from the enriched payload.
    ///
    /// Two-pass by design: every row is materialized before any width is
    /// computed, so the question/answer export can size its segment columns
    /// to the run's maximum.
    #[instrument(skip(report), fields(records = report.data.len()))]
    pub fn build(report: &LogReport) -> Self {
        let logs = &report.data;

        let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut users: IndexMap<String, UserAcc> = IndexMap::new();
        let mut sessions: IndexSet<String> = IndexSet::new();
        let mut total_tokens: u64 = 0;
        let mut total_time: f64 = 0.0;
        let mut total_cost: f64 = 0.0;
        let mut timestamps: Vec<f64> = Vec::new();

        // Per-record session and creation time, for question ordering.
        let mut record_sessions: Vec<Option<String>> = Vec::with_capacity(logs.len());
        let mut qa_rows: Vec<QaRow> = Vec::new();

        for (index, log) in logs.iter().enumerate() {
            let sequence = index + 1;
            let created_at = log.record.created_at;

            if let Some(ts) = created_at {
                timestamps.push(ts);
                if let Some(date) = local_date(ts) {
                    *daily.entry(date).or_insert(0) += 1;
                }
            }

            let user_id = resolve_user_id(log);
            if let Some(user_id) = &user_id {
                let acc = users.entry(user_id.clone()).or_default();
                acc.message_count += 1;
                if let Some(ts) = created_at {
                    if acc.first_seen.is_none_or(|first| ts < first) {
                        acc.first_seen = Some(ts);
                    }
                    if acc.last_seen.is_none_or(|last| ts > last) {
                        acc.last_seen = Some(ts);
                    }
                    if let Some(date) = local_date(ts) {
                        acc.days.insert(date);
                    }
                }
            }

            let session_id = resolve_session_id(log);
            if let Some(session_id) = &session_id {
                sessions.insert(session_id.clone());
            }
            record_sessions.push(session_id.clone());

            if let Some(detail) = &log.workflow_run_detail {
                total_tokens += detail.total_tokens;
            }
            if let Some(run) = &log.record.workflow_run {
                total_time += run.elapsed_time;
            }
            total_cost += llm_cost(log);

            Self::push_qa_rows(&mut qa_rows, log, sequence, &user_id, &session_id);
        }

        Self::assign_question_order(&mut qa_rows, logs, &record_sessions);

        let segment_columns = qa_rows
            .iter()
            .map(|row| row.segments.len())
            .max()
            .unwrap_or(0)
            .max(MIN_SEGMENT_COLUMNS);

        let total_messages = logs.len() as u64;
        let total_sessions = sessions.len() as u64;
        let avg_session_interactions = if total_sessions > 0 {
            total_messages as f64 / total_sessions as f64
        } else {
            0.0
        };
        let token_throughput = if total_time > 0.0 {
            total_tokens as f64 / total_time
        } else {
            0.0
        };

        let start = timestamps.iter().cloned().reduce(f64::min);
        let end = timestamps.iter().cloned().reduce(f64::max);

        let overview = OverviewRow {
            start_date: format_date(start),
            end_date: format_date(end),
            total_messages,
            total_users: users.len() as u64,
            total_sessions,
            avg_session_interactions,
            token_throughput,
            satisfaction: String::new(),
            total_cost,
        };

        let daily = daily
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        let mut users: Vec<UserStat> = users
            .into_iter()
            .map(|(user_id, acc)| UserStat {
                user_id,
                message_count: acc.message_count,
                active_days: acc.days.len() as u64,
                first_seen: format_date(acc.first_seen),
                last_seen: format_date(acc.last_seen),
            })
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        users.sort_by(|a, b| b.message_count.cmp(&a.message_count));

        debug!(
            qa_rows = qa_rows.len(),
            segment_columns, "derived report tables"
        );

        ReportTables {
            overview,
            daily,
            users,
            qa: QaTable {
                rows: qa_rows,
                segment_columns,
            },
        }
    }

    fn push_qa_rows(
        rows: &mut Vec<QaRow>,
        log: &EnrichedLog,
        sequence: usize,
        user_id: &Option<String>,
        session_id: &Option<String>,
    ) {
        let query = resolve_query(log);
        let answer = truncate_chars(&resolve_answer(log), MAX_ANSWER_CHARS);
        let attachments = attachment_names(log).join("; ");
        let created_at = match log.record.created_at {
            Some(ts) => format_timestamp(Some(ts)),
            None => String::new(),
        };

        let base = QaRow {
            sequence,
            user_id: user_id.clone().unwrap_or_default(),
            session_id: session_id.clone().unwrap_or_default(),
            question_order: 1,
            query,
            attachments,
            answer,
            dataset_name: String::new(),
            document_name: String::new(),
            segments: Vec::new(),
            created_at,
        };

        let segments = collect_segments(log);
        if segments.is_empty() {
            rows.push(base);
            return;
        }

        // Group citations by (knowledge base, document) in first-seen order;
        // one row per distinct pair, all occurrences kept.
        let mut groups: IndexMap<(String, String), Vec<String>> = IndexMap::new();
        for segment in segments {
            groups
                .entry((segment.dataset, segment.document))
                .or_default()
                .push(segment.text);
        }

        for ((dataset_name, document_name), segment_texts) in groups {
            rows.push(QaRow {
                dataset_name,
                document_name,
                segments: segment_texts,
                ..base.clone()
            });
        }
    }

    /// Assigns each record a 1-based question order within its session by
    /// ascending creation time; every row inherits its record's order.
    /// Records without a session keep order 1. Row order itself is left
    /// untouched: the export stays sorted by record sequence.
    fn assign_question_order(
        rows: &mut [QaRow],
        logs: &[EnrichedLog],
        record_sessions: &[Option<String>],
    ) {
        let mut by_session: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (index, session) in record_sessions.iter().enumerate() {
            if let Some(session) = session {
                by_session.entry(session.as_str()).or_default().push(index);
            }
        }

        let mut order_by_record: Vec<usize> = vec![1; logs.len()];
        for indices in by_session.values() {
            let mut ordered = indices.clone();
            ordered.sort_by(|a, b| {
                let ta = logs[*a].record.created_at.unwrap_or(0.0);
                let tb = logs[*b].record.created_at.unwrap_or(0.0);
                ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
            });
            for (order, record_index) in ordered.into_iter().enumerate() {
                order_by_record[record_index] = order + 1;
            }
        }

        for row in rows.iter_mut() {
            row.question_order = order_by_record[row.sequence - 1];
        }
    }
}
