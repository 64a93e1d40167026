use chrono::{Local, TimeZone};
use flowlog_core::{EnrichedLog, LogReport};
use flowlog_report::ReportTables;
use serde_json::{json, Value};

fn log(value: Value) -> EnrichedLog {
    serde_json::from_value(value).unwrap()
}

fn report(data: Vec<EnrichedLog>) -> LogReport {
    LogReport {
        total: data.len() as u64,
        page: None,
        limit: None,
        has_more: false,
        data,
    }
}

/// Epoch seconds for a local wall-clock time, so date assertions hold in any
/// timezone.
fn local_ts(y: i32, mo: u32, d: u32, h: u32) -> f64 {
    Local
        .with_ymd_and_hms(y, mo, d, h, 0, 0)
        .single()
        .unwrap()
        .timestamp() as f64
}

#[test]
fn overview_cost_coerces_string_prices_and_ignores_missing_usage() {
    let logs = vec![log(json!({
        "id": "log-1",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-1", "status": "succeeded", "elapsed_time": 1.0},
        "node_executions": [
            {"node_type": "llm", "process_data": {"usage": {"total_price": "0.002"}}},
            {"node_type": "llm", "process_data": {"usage": {"total_price": 0.003}}},
            {"node_type": "llm", "process_data": {}},
        ]
    }))];

    let tables = ReportTables::build(&report(logs));
    assert!((tables.overview.total_cost - 0.005).abs() < 1e-9);
}

#[test]
fn overview_token_throughput_divides_tokens_by_run_time() {
    let logs = vec![
        log(json!({
            "id": "a",
            "created_at": 1700000000.0,
            "workflow_run": {"id": "run-a", "elapsed_time": 3.0},
            "workflow_run_detail": {"id": "run-a", "total_tokens": 90, "total_steps": 1, "elapsed_time": 3.0}
        })),
        log(json!({
            "id": "b",
            "created_at": 1700000100.0,
            "workflow_run": {"id": "run-b", "elapsed_time": 1.0},
            "workflow_run_detail": {"id": "run-b", "total_tokens": 10, "total_steps": 1, "elapsed_time": 1.0}
        })),
    ];

    let tables = ReportTables::build(&report(logs));
    assert!((tables.overview.token_throughput - 25.0).abs() < 1e-9);
    assert_eq!(tables.overview.total_messages, 2);
    // Each record falls back to its run id as its session.
    assert_eq!(tables.overview.total_sessions, 2);
    assert!((tables.overview.avg_session_interactions - 1.0).abs() < 1e-9);
}

#[test]
fn overview_throughput_is_zero_without_run_time() {
    let logs = vec![log(json!({"id": "a", "created_at": 1700000000.0}))];
    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.overview.token_throughput, 0.0);
    assert_eq!(tables.overview.satisfaction, "");
}

#[test]
fn daily_counts_bucket_by_local_date_ascending() {
    let day1 = local_ts(2024, 3, 1, 9);
    let day1_later = local_ts(2024, 3, 1, 15);
    let day2 = local_ts(2024, 3, 2, 9);

    let logs = vec![
        log(json!({"id": "a", "created_at": day2})),
        log(json!({"id": "b", "created_at": day1})),
        log(json!({"id": "c", "created_at": day1_later})),
    ];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.daily.len(), 2);
    assert_eq!(tables.daily[0].date.to_string(), "2024-03-01");
    assert_eq!(tables.daily[0].count, 2);
    assert_eq!(tables.daily[1].date.to_string(), "2024-03-02");
    assert_eq!(tables.daily[1].count, 1);
}

#[test]
fn user_identity_falls_back_to_sys_user_id_in_stringified_inputs() {
    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "workflow_run_detail": {
            "id": "run-a",
            "inputs": "{\"query\": \"hi\", \"sys\": {\"user_id\": \"u1\"}}"
        }
    }))];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.users.len(), 1);
    assert_eq!(tables.users[0].user_id, "u1");
    assert_eq!(tables.qa.rows[0].query, "hi");
    assert_eq!(tables.qa.rows[0].user_id, "u1");
}

#[test]
fn user_list_sorts_by_message_count_descending() {
    let day1 = local_ts(2024, 5, 1, 10);
    let day2 = local_ts(2024, 5, 2, 10);

    let quiet = json!({
        "id": "a",
        "created_at": day1,
        "created_by_end_user": {"session_id": "quiet-user"}
    });
    let chatty = |id: &str, ts: f64| {
        json!({
            "id": id,
            "created_at": ts,
            "created_by_end_user": {"session_id": "chatty-user"}
        })
    };

    let logs = vec![
        log(quiet),
        log(chatty("b", day1)),
        log(chatty("c", day2)),
    ];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.users[0].user_id, "chatty-user");
    assert_eq!(tables.users[0].message_count, 2);
    assert_eq!(tables.users[0].active_days, 2);
    assert_eq!(tables.users[0].first_seen, "2024-05-01");
    assert_eq!(tables.users[0].last_seen, "2024-05-02");
    assert_eq!(tables.users[1].user_id, "quiet-user");
}

#[test]
fn citations_group_by_dataset_document_pair() {
    let retrieval_outputs = json!({
        "result": [
            {"content": "first passage", "metadata": {"dataset_name": "datasetA", "document_name": "docX", "score": 0.91}},
            {"content": "second passage", "metadata": {"dataset_name": "datasetA", "document_name": "docX", "score": 0.85}},
            {"content": "third passage", "metadata": {"dataset_name": "datasetA", "document_name": "docY", "score": 0.72}},
        ]
    });

    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "node_executions": [
            {"node_type": "knowledge-retrieval", "outputs": retrieval_outputs.to_string()}
        ]
    }))];

    let tables = ReportTables::build(&report(logs));

    // One record, two distinct (dataset, document) pairs -> exactly 2 rows.
    assert_eq!(tables.qa.rows.len(), 2);
    let first = &tables.qa.rows[0];
    let second = &tables.qa.rows[1];

    assert_eq!(first.dataset_name, "datasetA");
    assert_eq!(first.document_name, "docX");
    assert_eq!(first.segments.len(), 2);
    assert!(first.segments[0].starts_with("similarity:0.9100\n"));
    assert!(first.segments[1].starts_with("similarity:0.8500\n"));

    assert_eq!(second.document_name, "docY");
    assert_eq!(second.segments.len(), 1);

    // Both rows share the record's sequence number.
    assert_eq!(first.sequence, 1);
    assert_eq!(second.sequence, 1);

    // Floor of three segment columns.
    assert_eq!(tables.qa.segment_columns, 3);
}

#[test]
fn segment_columns_widen_to_the_largest_group() {
    let passages: Vec<Value> = (0..5)
        .map(|i| {
            json!({
                "content": format!("passage {i}"),
                "metadata": {"dataset_name": "kb", "document_name": "doc", "score": 0.5}
            })
        })
        .collect();

    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "node_executions": [
            {"node_type": "knowledge-retrieval", "outputs": {"result": passages}}
        ]
    }))];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.qa.rows.len(), 1);
    assert_eq!(tables.qa.rows[0].segments.len(), 5);
    assert_eq!(tables.qa.segment_columns, 5);
}

#[test]
fn record_without_citations_emits_one_empty_row() {
    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "workflow_run_detail": {
            "id": "run-a",
            "inputs": {"query": "hello"},
            "outputs": {"text": "hi there"}
        },
        "node_executions": []
    }))];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.qa.rows.len(), 1);
    let row = &tables.qa.rows[0];
    assert_eq!(row.query, "hello");
    assert_eq!(row.answer, "hi there");
    assert_eq!(row.dataset_name, "");
    assert_eq!(row.document_name, "");
    assert!(row.segments.is_empty());
}

#[test]
fn question_order_follows_creation_time_within_a_session() {
    let mk = |id: &str, ts: f64| {
        log(json!({
            "id": id,
            "created_at": ts,
            "created_by_end_user": {"session_id": "s1"}
        }))
    };

    // Encounter order: timestamps 100, 50, 200.
    let logs = vec![mk("a", 100.0), mk("b", 50.0), mk("c", 200.0)];
    let tables = ReportTables::build(&report(logs));

    let orders: Vec<usize> = tables.qa.rows.iter().map(|r| r.question_order).collect();
    assert_eq!(orders, [2, 1, 3]);

    // Row order itself stays by record sequence.
    let sequences: Vec<usize> = tables.qa.rows.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, [1, 2, 3]);
}

#[test]
fn answers_are_truncated_to_five_thousand_chars() {
    let long_answer: String = "宽".repeat(6000);
    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "workflow_run_detail": {
            "id": "run-a",
            "outputs": {"text": long_answer}
        }
    }))];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.qa.rows[0].answer.chars().count(), 5000);
}

#[test]
fn attachments_join_names_from_sys_files() {
    let logs = vec![log(json!({
        "id": "a",
        "created_at": 1700000000.0,
        "workflow_run": {"id": "run-a"},
        "workflow_run_detail": {
            "id": "run-a",
            "inputs": {"sys.files": [
                {"name": "report.pdf"},
                {"filename": "diagram.png"}
            ]}
        }
    }))];

    let tables = ReportTables::build(&report(logs));
    assert_eq!(tables.qa.rows[0].attachments, "report.pdf; diagram.png");
}
