use flowlog_core::{EnrichedLog, LogReport};
use flowlog_report::{render, OutputFormat};
use serde_json::json;

fn sample_report() -> LogReport {
    let data: Vec<EnrichedLog> = vec![
        serde_json::from_value(json!({
            "id": "log-1",
            "created_at": 1700000000.0,
            "created_from": "service-api",
            "created_by_end_user": {"session_id": "s1"},
            "workflow_run": {"id": "run-1", "status": "succeeded", "elapsed_time": 1.5},
            "workflow_run_detail": {
                "id": "run-1",
                "status": "succeeded",
                "elapsed_time": 1.5,
                "total_tokens": 200,
                "total_steps": 3,
                "inputs": {"query": "what is flow?"},
                "outputs": {"text": "flow is..."}
            },
            "node_executions": [
                {
                    "node_type": "knowledge-retrieval",
                    "title": "retrieve",
                    "outputs": {"result": [
                        {"content": "passage", "metadata": {"dataset_name": "kb", "document_name": "doc", "score": 0.9}}
                    ]}
                },
                {"node_type": "llm", "title": "answer", "process_data": {"usage": {"total_price": "0.005"}}}
            ]
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "id": "log-2",
            "created_at": 1700000100.0,
            "workflow_run": {"id": "run-2", "status": "failed", "elapsed_time": 0.3},
            "workflow_run_detail_error": "HTTP 500 error: upstream"
        }))
        .unwrap(),
    ];

    LogReport {
        total: 2,
        page: Some(1),
        limit: Some(20),
        has_more: false,
        data,
    }
}

#[test]
fn json_round_trip_preserves_total_and_data_length() {
    let report = sample_report();
    let files = render(&report, OutputFormat::Json).unwrap();
    assert_eq!(files.len(), 1);

    let reloaded: LogReport = serde_json::from_slice(&files[0].bytes).unwrap();
    assert_eq!(reloaded.total, report.total);
    assert_eq!(reloaded.data.len(), report.data.len());
}

#[test]
fn csv_render_produces_four_files_with_bom() {
    let report = sample_report();
    let files = render(&report, OutputFormat::Csv).unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "问答类应用数-总览.csv",
            "问答类应用数-每日消息数.csv",
            "问答类应用数-用户列表.csv",
            "问答类应用数-用户问答对.csv",
        ]
    );
    for file in &files {
        assert!(file.bytes.starts_with(b"\xEF\xBB\xBF"), "{}", file.name);
    }
}

#[test]
fn qa_csv_rows_share_one_arity() {
    let report = sample_report();
    let files = render(&report, OutputFormat::Csv).unwrap();
    let qa = files
        .iter()
        .find(|f| f.name.contains("用户问答对"))
        .unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(&qa.bytes[3..]);
    let mut arities = std::collections::HashSet::new();
    let mut rows = 0;
    for record in reader.records() {
        arities.insert(record.unwrap().len());
        rows += 1;
    }

    assert_eq!(arities.len(), 1, "all rows share the header arity");
    // Floor of 3 segment columns plus the 10 fixed columns.
    assert!(arities.contains(&13));
    // Frame rows (2 around the header, 3 around the note) plus 2 data rows.
    assert_eq!(rows, 8);
}

#[test]
fn overview_csv_carries_cost_and_counts() {
    let report = sample_report();
    let files = render(&report, OutputFormat::Csv).unwrap();
    let overview = files.iter().find(|f| f.name.contains("总览")).unwrap();

    let text = String::from_utf8(overview.bytes[3..].to_vec()).unwrap();
    let data_line = text.lines().nth(1).unwrap();
    assert!(data_line.contains("0.005000"), "{}", data_line);
    // Two messages, two sessions (end-user session + run-id fallback).
    assert!(data_line.contains(",2,"), "{}", data_line);
}

#[test]
fn markdown_render_documents_failures_inline() {
    let report = sample_report();
    let files = render(&report, OutputFormat::Markdown).unwrap();
    assert_eq!(files.len(), 1);

    let text = String::from_utf8(files[0].bytes.clone()).unwrap();
    assert!(text.contains("# 工作流执行日志报告"));
    assert!(text.contains("## 📊 整体摘要"));
    assert!(text.contains("### 状态统计"));
    assert!(text.contains("`log-1`"));
    assert!(text.contains("获取失败: HTTP 500 error: upstream"));
    // Stringified JSON decoded before pretty-printing.
    assert!(text.contains("what is flow?"));
}
