use api_lib::adapters::GeminiAnalysisAdapter;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use syllabus_core::analysis::MAX_PROMPT_TEXT_CHARS;
use syllabus_core::SyllabusAnalysisService;

/// A stand-in for the `generateContent` endpoint that records every call.
#[derive(Clone)]
struct MockGemini {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

#[derive(Debug, Clone)]
struct SeenRequest {
    call: String,
    key: Option<String>,
    body: Value,
}

impl MockGemini {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn replying(text: &str) -> Self {
        Self::new(
            StatusCode::OK,
            json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] }),
        )
    }

    fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn generate_content(
    State(mock): State<MockGemini>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    mock.seen.lock().unwrap().push(SeenRequest {
        call,
        key: query.get("key").cloned(),
        body,
    });
    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
}

/// Serves the mock on an ephemeral port and returns its base URL.
async fn spawn_mock(mock: MockGemini) -> String {
    let app = Router::new()
        .route("/v1beta/models/{call}", post(generate_content))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn adapter(base_url: String) -> GeminiAnalysisAdapter {
    GeminiAnalysisAdapter::new(
        reqwest::Client::new(),
        base_url,
        "gemini-test".to_string(),
        "test-key".to_string(),
    )
}

const FENCED_REPLY: &str = "```json\n{\"courseName\":\"Algo\",\"hoursPerWeek\":10,\"difficulty\":6,\"reasoning\":\"ok\"}\n```";

#[tokio::test]
async fn fenced_reply_becomes_a_course() {
    let mock = MockGemini::replying(FENCED_REPLY);
    let base_url = spawn_mock(mock.clone()).await;

    let course = adapter(base_url)
        .analyze("CS 301 Algorithms syllabus", "algo.pdf")
        .await
        .unwrap();

    assert_eq!(course.course_name, "Algo");
    assert_eq!(course.hours_per_week, 10.0);
    assert_eq!(course.difficulty, 6.0);
    assert_eq!(course.reasoning, "ok");
    assert_eq!(course.file_name, "algo.pdf");

    let seen = mock.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].call, "gemini-test:generateContent");
    assert_eq!(seen[0].key.as_deref(), Some("test-key"));

    let prompt = seen[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("Analyze this college course syllabus"));
    assert!(prompt.ends_with("CS 301 Algorithms syllabus"));
}

#[tokio::test]
async fn each_analysis_gets_a_fresh_id() {
    let base_url = spawn_mock(MockGemini::replying(FENCED_REPLY)).await;
    let adapter = adapter(base_url);

    let first = adapter.analyze("text", "a.pdf").await.unwrap();
    let second = adapter.analyze("text", "a.pdf").await.unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn long_text_is_truncated_in_the_request() {
    let mock = MockGemini::replying(FENCED_REPLY);
    let base_url = spawn_mock(mock.clone()).await;

    let text = "~".repeat(MAX_PROMPT_TEXT_CHARS * 2);
    adapter(base_url).analyze(&text, "long.pdf").await.unwrap();

    let seen = mock.seen();
    let prompt = seen[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert_eq!(prompt.matches('~').count(), MAX_PROMPT_TEXT_CHARS);
}

#[tokio::test]
async fn invalid_json_reply_is_an_analysis_error() {
    let base_url = spawn_mock(MockGemini::replying("Sorry, I can't help with that.")).await;

    let err = adapter(base_url).analyze("text", "x.pdf").await.unwrap_err();
    assert!(err.message().starts_with("model reply is not valid JSON"));
}

#[tokio::test]
async fn remote_error_message_is_surfaced() {
    let mock = MockGemini::new(
        StatusCode::FORBIDDEN,
        json!({ "error": { "code": 403, "message": "API key not valid. Please pass a valid API key.", "status": "PERMISSION_DENIED" } }),
    );
    let base_url = spawn_mock(mock).await;

    let err = adapter(base_url).analyze("text", "x.pdf").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to analyze: API key not valid. Please pass a valid API key."
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_an_analysis_error() {
    // Nothing listens on port 1.
    let err = adapter("http://127.0.0.1:1/v1beta".to_string())
        .analyze("text", "x.pdf")
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to analyze: "));
}
