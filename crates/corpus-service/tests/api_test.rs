//! In-process tests of the HTTP API.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use corpus_embeddings::{MockEmbedder, ModelCache, ModelSession};
use corpus_service::{build_router, AppState};

const DIM: usize = 16;

fn mock_session(model: MockEmbedder) -> Arc<ModelSession> {
    Arc::new(ModelSession::from_model("mock-model", Box::new(model), 2).unwrap())
}

fn app() -> Router {
    app_with(mock_session(MockEmbedder::new(DIM)))
}

fn app_with(session: Arc<ModelSession>) -> Router {
    build_router(AppState::new(session, 1024 * 1024))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn floats(value: &Value) -> Vec<f32> {
    serde_json::from_value(value.clone()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "mock-model");
    assert_eq!(body["embedding_dim"], DIM);
}

#[tokio::test]
async fn test_embed_one() {
    let (status, body) = send(app(), Method::POST, "/embed", r#"{"text": "hello world"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimension"], DIM);

    let embedding = floats(&body["embedding"]);
    assert_eq!(embedding.len(), DIM);

    let reference = mock_session(MockEmbedder::new(DIM));
    assert_eq!(embedding, reference.encode("hello world").unwrap());
}

#[tokio::test]
async fn test_embed_batch_preserves_order() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/embed-batch",
        r#"{"texts": ["a", "b", "c"]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["dimension"], DIM);

    let reference = mock_session(MockEmbedder::new(DIM));
    let embeddings = body["embeddings"].as_array().unwrap();
    for (value, text) in embeddings.iter().zip(["a", "b", "c"]) {
        assert_eq!(floats(value), reference.encode(text).unwrap());
    }
}

#[tokio::test]
async fn test_embed_batch_is_not_truncated() {
    let texts: Vec<String> = (0..75).map(|i| format!("text {i}")).collect();
    let body = serde_json::json!({ "texts": texts }).to_string();

    let (status, body) = send(app(), Method::POST, "/embed-batch", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 75);
    assert_eq!(body["embeddings"].as_array().unwrap().len(), 75);
}

#[tokio::test]
async fn test_validation_errors_are_400() {
    let cases = [
        ("/embed", "{}", "Missing 'text' field"),
        ("/embed", r#"{"text": ""}"#, "'text' must be a non-empty string"),
        ("/embed", r#"{"text": 7}"#, "'text' must be a non-empty string"),
        ("/embed-batch", "{}", "Missing 'texts' field"),
        ("/embed-batch", r#"{"texts": []}"#, "'texts' must be a non-empty array"),
        ("/embed-batch", r#"{"texts": {"a": 1}}"#, "'texts' must be a non-empty array"),
    ];

    for (uri, body, message) in cases {
        let (status, json) = send(app(), Method::POST, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(json["error"], message, "{uri} {body}");
    }
}

#[tokio::test]
async fn test_non_json_body_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/embed")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello world"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_model_failure_is_500() {
    let app = app_with(mock_session(MockEmbedder::new(DIM).failing_on("boom")));
    let (status, json) = send(app, Method::POST, "/embed", r#"{"text": "boom"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().starts_with("Embedding failed"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, json) = send(app(), Method::GET, "/search", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not found");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let (status, json) = send(app(), Method::GET, "/embed", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");

    let (status, json) = send(app(), Method::POST, "/health", "{}").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn test_oversized_body_is_json_413() {
    let app = build_router(AppState::new(mock_session(MockEmbedder::new(DIM)), 64));
    let body = serde_json::json!({ "text": "x".repeat(500) }).to_string();

    let (status, json) = send(app, Method::POST, "/embed", &body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "Request body exceeds the 64 byte limit");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_session() {
    let model = MockEmbedder::new(DIM);
    let stats = model.stats();
    let app = app_with(mock_session(model));

    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let body = format!(r#"{{"text": "request {i}"}}"#);
            send(app, Method::POST, "/embed", &body).await
        }));
    }
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dimension"], DIM);
    }

    assert_eq!(stats.max_in_flight(), 1);
}

#[tokio::test]
#[ignore = "requires model download"]
async fn test_default_model_dimension() {
    let cache = ModelCache::with_default_dir("sentence-transformers/all-MiniLM-L6-v2");
    let session = Arc::new(ModelSession::load(&cache, 32).unwrap());

    let (status, body) = send(
        app_with(session),
        Method::POST,
        "/embed",
        r#"{"text": "hello world"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimension"], 384);
}
