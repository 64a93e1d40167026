use flowlog::{LogReport, Pipeline, PipelineParams};
use flowlog_report::OutputFormat;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_params(server: &MockServer, out: &TempDir, format: OutputFormat) -> PipelineParams {
    PipelineParams {
        base_url: Some(server.uri()),
        api_token: Some("app-tok".into()),
        output_format: Some(format),
        output_dir: Some(out.path().to_path_buf()),
        ..PipelineParams::default()
    }
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/workflows/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "page": 1,
            "limit": 20,
            "has_more": false,
            "data": [{
                "id": "log-1",
                "created_at": 1700000000.0,
                "created_by_end_user": {"session_id": "s1"},
                "workflow_run": {"id": "run-1", "status": "succeeded", "elapsed_time": 1.0}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn json_run_writes_a_reloadable_dump() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    mount_listing(&server).await;

    let pipeline = Pipeline::new(base_params(&server, &out, OutputFormat::Json)).unwrap();
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(outcome.written.len(), 1);
    let reloaded: LogReport =
        serde_json::from_slice(&std::fs::read(&outcome.written[0]).unwrap()).unwrap();
    assert_eq!(reloaded.total, outcome.report.total);
    assert_eq!(reloaded.data.len(), outcome.report.data.len());
}

#[tokio::test]
async fn json_run_without_detail_flags_skips_enrichment() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    mount_listing(&server).await;

    // The run-detail endpoint must never be called.
    Mock::given(method("GET"))
        .and(path("/v1/workflows/run/run-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "run-1"})))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(base_params(&server, &out, OutputFormat::Json)).unwrap();
    let outcome = pipeline.run().await.unwrap();
    assert!(outcome.report.data[0].workflow_run_detail.is_none());
}

#[tokio::test]
async fn csv_run_implies_detail_enrichment() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    mount_listing(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/workflows/run/run-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "run-1",
            "status": "succeeded",
            "elapsed_time": 1.0,
            "total_tokens": 30,
            "total_steps": 2,
            "inputs": "{\"query\": \"what is flow?\"}",
            "outputs": {"text": "flow is..."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(base_params(&server, &out, OutputFormat::Csv)).unwrap();
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(outcome.written.len(), 4);
    let qa = outcome
        .written
        .iter()
        .find(|p| p.to_string_lossy().contains("用户问答对"))
        .unwrap();
    let text = String::from_utf8_lossy(&std::fs::read(qa).unwrap()).into_owned();
    assert!(text.contains("what is flow?"));
}

#[tokio::test]
async fn fetch_all_run_reports_page_walk_totals() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/workflows/logs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2, "page": 1, "limit": 1, "has_more": true,
            "data": [{"id": "log-1", "created_at": 1700000000.0}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/workflows/logs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2, "page": 2, "limit": 1, "has_more": false,
            "data": [{"id": "log-2", "created_at": 1700000100.0}]
        })))
        .mount(&server)
        .await;

    let mut params = base_params(&server, &out, OutputFormat::Json);
    params.fetch_all = true;
    params.limit = Some(1);

    let outcome = Pipeline::new(params).unwrap().run().await.unwrap();
    assert_eq!(outcome.report.total, 2);
    assert_eq!(outcome.report.page, None);
    assert!(!outcome.report.has_more);
    assert_eq!(outcome.report.data.len(), 2);
}

#[tokio::test]
async fn listing_failure_is_fatal_to_the_run() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/workflows/logs"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such app"))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(base_params(&server, &out, OutputFormat::Json)).unwrap();
    let err = pipeline.run().await.unwrap_err();
    assert!(err.to_string().contains("404"));

    // Nothing was written.
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn enrichment_failure_still_produces_a_report() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    mount_listing(&server).await;

    // Undecodable detail body: recorded on the record, not fatal.
    Mock::given(method("GET"))
        .and(path("/v1/workflows/run/run-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut params = base_params(&server, &out, OutputFormat::Json);
    params.with_details = true;

    let outcome = Pipeline::new(params).unwrap().run().await.unwrap();
    assert_eq!(outcome.written.len(), 1);
    assert!(outcome.report.data[0].workflow_run_detail_error.is_some());
}
