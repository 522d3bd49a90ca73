//! `GET /health`

use axum::extract::State;
use axum::Json;

use crate::response::HealthResponse;
use crate::state::AppState;

/// Always succeeds while the process is up; the session exists before the
/// router is built.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.session.identifier().to_string(),
        embedding_dim: state.session.dimension(),
    })
}
