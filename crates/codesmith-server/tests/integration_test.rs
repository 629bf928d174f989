//! End-to-end integration tests for the codesmith HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! model client / store -> HTTP response.
//!
//! Each test creates a fresh AppState backed by an in-memory SQLite database
//! and a mock model. Tests use `tower::ServiceExt::oneshot` to send requests
//! directly to the router without starting a network server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use codesmith_server::error::ApiError;
use codesmith_server::model::CodeModel;
use codesmith_server::router::build_router;
use codesmith_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Mock model: replies with a fixed string or a fixed failure, and records
/// the prompts it receives.
struct MockModel {
    reply: Result<String, String>,
    seen_prompts: Mutex<Vec<String>>,
}

impl MockModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(MockModel {
            reply: Ok(text.to_string()),
            seen_prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(MockModel {
            reply: Err(message.to_string()),
            seen_prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CodeModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.seen_prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ApiError::GenerationFailed(message.clone())),
        }
    }
}

/// Creates a fresh router backed by an in-memory database and the given mock.
fn test_app(model: Arc<MockModel>) -> Router {
    let state = AppState::in_memory(model).expect("failed to create in-memory AppState");
    build_router(state)
}

/// Sends a POST request with a JSON body and returns (status, json).
async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Generates one record, asserting success.
async fn generate(app: &Router, prompt: &str, language: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app,
        "/generate",
        json!({ "prompt": prompt, "language": language }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "generate failed: {:?}", body);
    assert_eq!(body["success"], json!(true));
    body
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_strips_fences_and_persists() {
    let model = MockModel::replying("```python\nprint('hi')\n```");
    let app = test_app(model);

    let body = generate(&app, "print hi", "Python").await;
    assert_eq!(body["code"], json!("print('hi')"));
    assert_eq!(body["language"], json!("Python"));
    assert_eq!(body["prompt"], json!("print hi"));
    assert!(!body["generationId"].as_str().unwrap().is_empty());
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn generate_builds_the_model_prompt() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model.clone());

    generate(&app, "set x to one", "Python").await;

    let prompts = model.seen_prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate Python code"));
    assert!(prompts[0].ends_with("set x to one"));
}

#[tokio::test]
async fn generate_requires_prompt() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model.clone());

    let (status, body) = post_json(&app, "/generate", json!({ "language": "Python" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("Prompt"));

    // Rejected before any model call.
    assert!(model.seen_prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn generate_rejects_wrong_typed_fields() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);

    let (status, body) =
        post_json(&app, "/generate", json!({ "prompt": 42, "language": "Python" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, body) = post_json(
        &app,
        "/generate",
        json!({ "prompt": "p", "language": ["Python"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Language"));
}

#[tokio::test]
async fn malformed_json_body_gets_error_envelope() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn generate_rejects_empty_strings() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);

    let (status, _) = post_json(
        &app,
        "/generate",
        json!({ "prompt": "   ", "language": "Python" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fence_only_output_fails_and_persists_nothing() {
    let model = MockModel::replying("```\n```");
    let app = test_app(model);

    let (status, body) = post_json(
        &app,
        "/generate",
        json!({ "prompt": "p", "language": "Python" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));

    let (_, history) = get_json(&app, "/api/history").await;
    assert_eq!(history["pagination"]["totalCount"], json!(0));
    assert_eq!(history["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn model_failure_surfaces_as_generation_error() {
    let model = MockModel::failing("provider quota exceeded");
    let app = test_app(model);

    let (status, body) = post_json(
        &app,
        "/generate",
        json!({ "prompt": "p", "language": "Python" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("quota"));
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[tokio::test]
async fn history_paginates_25_records() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    for i in 0..25 {
        generate(&app, &format!("prompt {}", i), "Python").await;
    }

    let (status, body) = get_json(&app, "/api/history?page=3&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], json!(3));
    assert_eq!(pagination["limit"], json!(10));
    assert_eq!(pagination["totalCount"], json!(25));
    assert_eq!(pagination["totalPages"], json!(3));
    assert_eq!(pagination["hasNextPage"], json!(false));
    assert_eq!(pagination["hasPreviousPage"], json!(true));

    // Middle page.
    let (_, body) = get_json(&app, "/api/history?page=2&limit=10").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["hasNextPage"], json!(true));
    assert_eq!(body["pagination"]["hasPreviousPage"], json!(true));

    // Past the end: empty data, still-consistent metadata.
    let (status, body) = get_json(&app, "/api/history?page=9&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["totalPages"], json!(3));
    assert_eq!(body["pagination"]["hasNextPage"], json!(false));
}

#[tokio::test]
async fn history_defaults_and_clamps_invalid_params() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    for i in 0..12 {
        generate(&app, &format!("prompt {}", i), "Python").await;
    }

    // No params: page 1, limit 10.
    let (_, body) = get_json(&app, "/api/history").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["page"], json!(1));
    assert_eq!(body["pagination"]["limit"], json!(10));

    // page=0 clamps up to 1; limit=500 clamps down to 100.
    let (_, body) = get_json(&app, "/api/history?page=0&limit=500").await;
    assert_eq!(body["pagination"]["page"], json!(1));
    assert_eq!(body["pagination"]["limit"], json!(100));
    assert_eq!(body["data"].as_array().unwrap().len(), 12);

    // Non-numeric values fall back to defaults; limit=0 clamps up to 1.
    let (_, body) = get_json(&app, "/api/history?page=abc&limit=0").await;
    assert_eq!(body["pagination"]["page"], json!(1));
    assert_eq!(body["pagination"]["limit"], json!(1));
}

#[tokio::test]
async fn history_survives_numerically_extreme_page() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    generate(&app, "p", "Python").await;

    // i64::MAX is numerically valid input; it must be corrected to an empty
    // out-of-range page, never an error or a wrapped offset.
    let (status, body) =
        get_json(&app, "/api/history?page=9223372036854775807&limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], json!(9223372036854775807u64));
    assert_eq!(pagination["totalCount"], json!(1));
    assert_eq!(pagination["hasNextPage"], json!(false));
    assert_eq!(pagination["hasPreviousPage"], json!(true));
}

#[tokio::test]
async fn history_returns_most_recent_first() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    generate(&app, "first", "Python").await;
    generate(&app, "second", "Python").await;
    generate(&app, "third", "Python").await;

    let (_, body) = get_json(&app, "/api/history").await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["prompt"], json!("third"));
    assert_eq!(data[1]["prompt"], json!("second"));
    assert_eq!(data[2]["prompt"], json!("first"));
}

#[tokio::test]
async fn history_filters_by_language_case_insensitively() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    generate(&app, "py prompt", "Python").await;
    generate(&app, "rs prompt", "Rust").await;

    let (_, body) = get_json(&app, "/api/history?language=PYTHON").await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["prompt"], json!("py prompt"));
    // Rows carry the display name as first submitted.
    assert_eq!(data[0]["language"], json!("Python"));
    assert_eq!(body["pagination"]["totalCount"], json!(1));
}

#[tokio::test]
async fn history_unknown_language_yields_empty_consistent_page() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    generate(&app, "py prompt", "Python").await;

    let (status, body) = get_json(&app, "/api/history?language=cobol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let pagination = &body["pagination"];
    assert_eq!(pagination["totalCount"], json!(0));
    assert_eq!(pagination["totalPages"], json!(0));
    assert_eq!(pagination["hasNextPage"], json!(false));
    assert_eq!(pagination["hasPreviousPage"], json!(false));
}

#[tokio::test]
async fn repeated_languages_reuse_one_tag() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);
    generate(&app, "a", "Python").await;
    generate(&app, "b", "PYTHON").await;
    generate(&app, "c", "python").await;

    // All three records resolve to the same canonical tag, so the filter
    // matches all of them and every row shows the first display name.
    let (_, body) = get_json(&app, "/api/history?language=python").await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    for item in data {
        assert_eq!(item["language"], json!("Python"));
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_connected_database() {
    let model = MockModel::replying("x = 1");
    let app = test_app(model);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"], json!("connected"));
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}
