//! Mock embedder for testing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Embedder that derives a unit vector from a hash of the text.
///
/// Equal texts always get equal vectors, so batch and single encoding agree
/// exactly. Useful for testing without downloading a model.
pub struct MockEmbedder {
    dimension: usize,
    info: ModelInfo,
    fail_on: Option<String>,
    stats: Arc<MockStats>,
}

/// Call counters shared with the test that built the embedder.
#[derive(Debug, Default)]
pub struct MockStats {
    batches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStats {
    /// Number of `embed_batch` calls made
    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    /// Largest number of overlapping `embed_batch` calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            info: ModelInfo {
                name: "mock-embedder".to_string(),
                max_sequence_length: 256,
            },
            fail_on: None,
            stats: Arc::new(MockStats::default()),
        }
    }

    /// Fail any batch that contains `text`.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on = Some(text.into());
        self
    }

    pub fn stats(&self) -> Arc<MockStats> {
        self.stats.clone()
    }

    fn vector_for(&self, text: &str) -> Embedding {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());
        let values = (0..self.dimension)
            .map(|_| rng.random_range(-1.0f32..1.0))
            .collect();
        Embedding::normalized(values)
    }
}

impl EmbeddingModel for MockEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.stats.batches.fetch_add(1, Ordering::SeqCst);
        let current = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let result = match &self.fail_on {
            Some(bad) if texts.iter().any(|t| t == bad) => Err(EmbeddingError::InvalidInput(
                format!("mock embedder refuses {:?}", bad),
            )),
            _ => Ok(texts.iter().map(|t| self.vector_for(t)).collect()),
        };

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_vectors() {
        let embedder = MockEmbedder::new(16);
        let a1 = embedder.embed("alpha").unwrap();
        let a2 = embedder.embed("alpha").unwrap();
        let b = embedder.embed("beta").unwrap();

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(a1.dimension(), 16);
    }

    #[test]
    fn test_failing_on() {
        let embedder = MockEmbedder::new(4).failing_on("bad");
        assert!(embedder.embed_batch(&["ok", "bad"]).is_err());
        assert!(embedder.embed_batch(&["ok"]).is_ok());
        assert_eq!(embedder.stats().batches(), 2);
    }
}
