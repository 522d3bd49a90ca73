//! Shared handler state.

use std::sync::Arc;

use corpus_embeddings::ModelSession;

#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Arc<ModelSession>,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(session: Arc<ModelSession>, max_body_bytes: usize) -> Self {
        Self {
            session,
            max_body_bytes,
        }
    }
}
