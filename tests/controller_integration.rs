//! Integration tests for the search-and-download flow against a mock backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use forecaster_core::{BackendClient, SearchController, SearchOutcome, Status, StatusSink};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sink that records every transition for later assertions.
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<Status>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<Status> {
        self.events.lock().unwrap().clone()
    }

    fn last(&self) -> Option<Status> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl StatusSink for RecordingSink {
    fn transition(&self, status: &Status) {
        self.events.lock().unwrap().push(status.clone());
    }
}

fn controller_for(
    endpoint: &str,
    output_dir: &TempDir,
) -> (SearchController<Arc<RecordingSink>>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let client = BackendClient::new(endpoint).unwrap();
    let controller = SearchController::new(
        client,
        Arc::clone(&sink),
        output_dir.path(),
        "forecast.xlsx",
    );
    (controller, sink)
}

#[tokio::test]
async fn empty_query_shows_banner_and_issues_no_request() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    for input in ["", "   ", "\t\n"] {
        let outcome = controller.handle_search(input).await;
        assert_eq!(outcome, SearchOutcome::Rejected, "input: {input:?}");
    }

    let events = sink.events();
    assert_eq!(events.len(), 3);
    for event in events {
        assert_eq!(event, Status::Error("Please enter a query.".to_string()));
    }
    // expect(0) on the mock verifies no request was issued.
}

#[tokio::test]
async fn successful_search_saves_forecast_and_clears_loading() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let payload = b"PK\x03\x04 spreadsheet bytes".to_vec();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .and(body_json(serde_json::json!({ "prompt": "6 month forecast" })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("  6 month forecast  ").await;

    let expected_path = temp_dir.path().join("forecast.xlsx");
    assert_eq!(outcome, SearchOutcome::Saved(expected_path.clone()));
    assert_eq!(std::fs::read(&expected_path).unwrap(), payload);

    let events = sink.events();
    assert_eq!(
        events,
        vec![Status::Loading, Status::Done(expected_path)],
        "no error banner expected on success"
    );
}

#[tokio::test]
async fn http_error_with_detail_shows_detail_verbatim() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "detail": "bad prompt" })),
        )
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("anything").await;

    assert_eq!(outcome, SearchOutcome::Failed);
    assert_eq!(sink.last(), Some(Status::Error("bad prompt".to_string())));
}

#[tokio::test]
async fn http_error_without_json_body_falls_back_to_generic_message() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("anything").await;

    assert_eq!(outcome, SearchOutcome::Failed);
    assert_eq!(
        sink.last(),
        Some(Status::Error("Network response was not ok".to_string()))
    );
}

#[tokio::test]
async fn connection_refused_shows_fetch_failure_prefix() {
    let temp_dir = TempDir::new().unwrap();

    // Bind then drop a listener to get a port nothing is listening on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = format!("http://127.0.0.1:{port}/forecast_from_prompt");
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("anything").await;

    assert_eq!(outcome, SearchOutcome::Failed);
    match sink.last() {
        Some(Status::Error(message)) => assert!(
            message.starts_with("Failed to fetch data. Please check the backend service. Error: "),
            "unexpected banner: {message}"
        ),
        other => panic!("expected Error status, got: {other:?}"),
    }

    // No partial file should remain in the output directory.
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(entries.is_empty(), "no files expected, found: {entries:?}");
}

#[tokio::test]
async fn loading_is_cleared_after_every_interaction() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    controller.handle_search("").await;
    controller.handle_search("a failing query").await;

    // Every Loading must be followed by a terminal state; the final recorded
    // status is never Loading.
    let events = sink.events();
    assert!(!events.is_empty());
    assert!(
        !events.last().unwrap().is_loading(),
        "final status must not be Loading: {events:?}"
    );
}

#[tokio::test]
async fn second_search_while_in_flight_is_ignored() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow spreadsheet")
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let sink = Arc::new(RecordingSink::default());
    let client = BackendClient::new(&endpoint).unwrap();
    let controller = Arc::new(SearchController::new(
        client,
        Arc::clone(&sink),
        temp_dir.path(),
        "forecast.xlsx",
    ));

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.handle_search("first query").await })
    };

    // Give the first request time to reach the mock server.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = controller.handle_search("second query").await;
    assert_eq!(second, SearchOutcome::Ignored);

    let first = first.await.unwrap();
    assert!(matches!(first, SearchOutcome::Saved(_)));
    // expect(1) on the mock verifies the ignored search issued no request.
}

#[tokio::test]
async fn server_content_disposition_filename_is_honored() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Content-Disposition",
                    r#"attachment; filename="q3_forecast.xlsx""#,
                )
                .set_body_bytes(b"bytes"),
        )
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, _sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("quarterly").await;

    let expected_path = temp_dir.path().join("q3_forecast.xlsx");
    assert_eq!(outcome, SearchOutcome::Saved(expected_path.clone()));
    assert!(expected_path.exists());
}

#[tokio::test]
async fn existing_forecast_file_is_not_overwritten() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("forecast.xlsx"), b"previous run").unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new forecast"))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, _sink) = controller_for(&endpoint, &temp_dir);

    let outcome = controller.handle_search("again").await;

    let expected_path = temp_dir.path().join("forecast_2.xlsx");
    assert_eq!(outcome, SearchOutcome::Saved(expected_path.clone()));
    assert_eq!(std::fs::read(&expected_path).unwrap(), b"new forecast");
    assert_eq!(
        std::fs::read(temp_dir.path().join("forecast.xlsx")).unwrap(),
        b"previous run",
        "the earlier file must be untouched"
    );
}

#[tokio::test]
async fn controller_is_usable_after_a_failure() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .and(body_json(serde_json::json!({ "prompt": "bad" })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({ "detail": "bad prompt" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/forecast_from_prompt"))
        .and(body_json(serde_json::json!({ "prompt": "good" })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok"))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/forecast_from_prompt", mock_server.uri());
    let (controller, sink) = controller_for(&endpoint, &temp_dir);

    assert_eq!(controller.handle_search("bad").await, SearchOutcome::Failed);
    let retry = controller.handle_search("good").await;
    assert!(matches!(retry, SearchOutcome::Saved(_)), "got: {retry:?}");
    assert!(matches!(sink.last(), Some(Status::Done(_))));
}
