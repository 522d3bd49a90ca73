//! End-to-end test infrastructure for the semantic corpus tools.
//!
//! Provides a shared TestHarness wiring a temporary RocksDB store, a
//! deterministic mock model session, and the HTTP router together the way
//! the `corpus` binary does.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use corpus_embeddings::{MockEmbedder, ModelSession};
use corpus_jobs::ReadinessVerifier;
use corpus_service::{build_router, AppState};
use corpus_storage::{Storage, StoreLocation};
use corpus_types::{CorpusEntry, Settings};

/// Output dimension of the mock model used throughout the E2E tests.
pub const TEST_DIMENSION: usize = 32;

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Settings pointing the store and model cache into the temp dir
    pub settings: Settings,
    /// Location of the test collection
    pub location: StoreLocation,
    /// Model session shared by seeding and the service
    pub session: Arc<ModelSession>,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        settings.store.uri = temp_dir.path().join("store").to_string_lossy().to_string();
        settings.model.cache_dir = temp_dir.path().join("models").to_string_lossy().to_string();
        settings.model.expected_dimension = TEST_DIMENSION;

        let location =
            StoreLocation::from_settings(&settings.store).expect("Invalid test store location");

        Self {
            _temp_dir: temp_dir,
            settings,
            location,
            session: mock_session(TEST_DIMENSION),
        }
    }

    /// Open the collection read-write, creating it if needed.
    pub fn open_store(&self) -> Storage {
        Storage::connect(&self.location).expect("Failed to open test storage")
    }

    /// Open the collection read-only, as the auditor and verifier do.
    pub fn open_reader(&self) -> Storage {
        Storage::connect_read_only(&self.location).expect("Failed to open test storage read-only")
    }

    /// Verifier over the harness settings, using a mock model of `dimension`.
    pub fn verifier(&self, dimension: usize) -> ReadinessVerifier {
        ReadinessVerifier::new(self.settings.clone()).with_model_loader(move |model| {
            ModelSession::from_model(
                &model.identifier,
                Box::new(MockEmbedder::new(dimension)),
                model.batch_size,
            )
        })
    }

    /// Router serving the harness session.
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.session.clone(), 1024 * 1024))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock session with the default batch size.
pub fn mock_session(dimension: usize) -> Arc<ModelSession> {
    let session = ModelSession::from_model(
        "mock-model",
        Box::new(MockEmbedder::new(dimension)),
        corpus_embeddings::DEFAULT_BATCH_SIZE,
    )
    .expect("Failed to build mock session");
    Arc::new(session)
}

/// Small corpus with distinct titles, spread over two categories.
pub fn sample_corpus(count: usize) -> Vec<CorpusEntry> {
    (0..count)
        .map(|i| {
            let category = if i % 2 == 0 { "Science" } else { "Technology" };
            CorpusEntry::new(
                format!("Document {}", i + 1),
                format!("Sample content for document number {}", i + 1),
                category,
            )
        })
        .collect()
}

/// POST a JSON body to the router and decode the JSON response.
pub async fn post_json(router: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");
    let response = router.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Decode a JSON array of numbers into a vector.
pub fn as_vector(value: &Value) -> Vec<f32> {
    serde_json::from_value(value.clone()).expect("Expected an array of numbers")
}
