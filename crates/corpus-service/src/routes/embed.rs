//! `POST /embed` and `POST /embed-batch`
//!
//! Encoding is CPU-bound and serialized inside the session, so it runs on
//! the blocking pool. Body parsing and validation stay on the async workers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::request::{BatchInput, TextInput};
use crate::response::{BatchEmbedResponse, EmbedResponse};
use crate::state::AppState;

pub async fn embed_one(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<EmbedResponse>> {
    let body = body.map_err(|r| ApiError::body_rejected(r, state.max_body_bytes))?;
    let input = TextInput::from_body(&body)?;

    let session = state.session.clone();
    let embedding = tokio::task::spawn_blocking(move || session.encode(&input.text))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(EmbedResponse {
        dimension: embedding.len(),
        embedding,
    }))
}

pub async fn embed_batch(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<BatchEmbedResponse>> {
    let body = body.map_err(|r| ApiError::body_rejected(r, state.max_body_bytes))?;
    let input = BatchInput::from_body(&body)?;
    debug!(count = input.texts.len(), "Batch embed request");

    let session = state.session.clone();
    let dimension = session.dimension();
    let embeddings = tokio::task::spawn_blocking(move || session.encode_all(&input.texts))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(BatchEmbedResponse {
        count: embeddings.len(),
        embeddings,
        dimension,
    }))
}
