//! The per-process model session.
//!
//! A session is built once at startup and shared by handle. It measures the
//! output dimension D with a probe encode, then guarantees that every vector
//! it returns has length D. Calls into the model are serialized with a mutex
//! because the numeric backend is not assumed to be reentrant.

use std::sync::Mutex;

use tracing::{debug, info};

use crate::cache::ModelCache;
use crate::candle::CandleEmbedder;
use crate::error::EmbeddingError;
use crate::model::EmbeddingModel;

/// Sentinel text encoded once to measure the output dimension
pub const PROBE_TEXT: &str = "test";

/// Default number of texts per forward pass
pub const DEFAULT_BATCH_SIZE: usize = 32;

pub struct ModelSession {
    identifier: String,
    dimension: usize,
    batch_size: usize,
    model: Mutex<Box<dyn EmbeddingModel>>,
}

impl std::fmt::Debug for ModelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSession")
            .field("identifier", &self.identifier)
            .field("dimension", &self.dimension)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl ModelSession {
    /// Load the Candle model named by the cache's identifier.
    pub fn load(cache: &ModelCache, batch_size: usize) -> Result<Self, EmbeddingError> {
        let model = CandleEmbedder::load(cache)?;
        Self::from_model(cache.identifier.clone(), Box::new(model), batch_size)
    }

    /// Wrap an already-loaded model and measure its dimension.
    pub fn from_model(
        identifier: impl Into<String>,
        model: Box<dyn EmbeddingModel>,
        batch_size: usize,
    ) -> Result<Self, EmbeddingError> {
        let identifier = identifier.into();
        let dimension = model
            .embed(PROBE_TEXT)
            .map_err(|e| EmbeddingError::unavailable(&identifier, e))?
            .dimension();
        if dimension == 0 {
            return Err(EmbeddingError::unavailable(
                &identifier,
                "probe encode returned an empty vector",
            ));
        }

        info!(model = %identifier, dim = dimension, "Model session ready");

        Ok(Self {
            identifier,
            dimension,
            batch_size: batch_size.max(1),
            model: Mutex::new(model),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The fixed output dimension D.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Encode one text into a vector of length D.
    pub fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.encode_group(&[text])?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Encode texts in order, `batch_size` texts per forward pass.
    ///
    /// `result[i]` is the vector for `texts[i]`. The whole call fails if any
    /// group fails; no partial result is returned.
    pub fn encode_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        batch_size: usize,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let batch_size = batch_size.max(1);
        let mut vectors = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(batch_size) {
            let refs: Vec<&str> = chunk.iter().map(AsRef::as_ref).collect();
            vectors.extend(self.encode_group(&refs)?);
        }

        debug!(count = vectors.len(), dim = self.dimension, "Batch encoded");
        Ok(vectors)
    }

    /// Encode with the session's configured batch size.
    pub fn encode_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.encode_batch(texts, self.batch_size)
    }

    fn encode_group(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let embeddings = {
            let model = self.model.lock().map_err(|_| EmbeddingError::Poisoned)?;
            model.embed_batch(texts)?
        };

        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: embeddings.len(),
            });
        }

        embeddings
            .into_iter()
            .map(|embedding| {
                if embedding.dimension() != self.dimension {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimension,
                        actual: embedding.dimension(),
                    });
                }
                Ok(embedding.into_values())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockEmbedder;
    use crate::model::{Embedding, ModelInfo};
    use std::sync::Arc;

    fn session(dim: usize) -> ModelSession {
        ModelSession::from_model("mock", Box::new(MockEmbedder::new(dim)), 2).unwrap()
    }

    #[test]
    fn test_dimension_probed_once() {
        let model = MockEmbedder::new(12);
        let stats = model.stats();
        let session = ModelSession::from_model("mock", Box::new(model), 4).unwrap();

        assert_eq!(session.dimension(), 12);
        assert_eq!(stats.batches(), 1);
        assert_eq!(session.dimension(), 12);
        assert_eq!(stats.batches(), 1);
    }

    #[test]
    fn test_encode_has_dimension_d() {
        let session = session(24);
        for text in ["", "hello world", "a much longer piece of text"] {
            assert_eq!(session.encode(text).unwrap().len(), 24);
        }
    }

    #[test]
    fn test_batch_matches_single_for_any_grouping() {
        let session = session(8);
        let texts: Vec<String> = (0..7).map(|i| format!("text number {i}")).collect();
        let singles: Vec<Vec<f32>> = texts.iter().map(|t| session.encode(t).unwrap()).collect();

        for batch_size in [1, 2, 3, 7, 32] {
            let batched = session.encode_batch(&texts, batch_size).unwrap();
            assert_eq!(batched.len(), texts.len());
            for (single, batch) in singles.iter().zip(&batched) {
                for (a, b) in single.iter().zip(batch) {
                    assert!((a - b).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_batch_groups_by_batch_size() {
        let model = MockEmbedder::new(4);
        let stats = model.stats();
        let session = ModelSession::from_model("mock", Box::new(model), 32).unwrap();

        let texts = vec!["x"; 70];
        let vectors = session.encode_all(&texts).unwrap();
        assert_eq!(vectors.len(), 70);
        // probe + ceil(70 / 32)
        assert_eq!(stats.batches(), 1 + 3);
    }

    #[test]
    fn test_failure_in_any_group_fails_whole_batch() {
        let model = MockEmbedder::new(4).failing_on("poison");
        let session = ModelSession::from_model("mock", Box::new(model), 2).unwrap();

        let texts = ["a", "b", "c", "poison"];
        assert!(session.encode_batch(&texts, 2).is_err());
    }

    #[test]
    fn test_empty_probe_is_unavailable() {
        let err = ModelSession::from_model("mock", Box::new(MockEmbedder::new(0)), 2).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelUnavailable { .. }));
    }

    struct ShrinkingModel {
        info: ModelInfo,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl EmbeddingModel for ShrinkingModel {
        fn info(&self) -> &ModelInfo {
            &self.info
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
            let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let dim = if n == 0 { 8 } else { 4 };
            Ok(texts.iter().map(|_| Embedding::normalized(vec![1.0; dim])).collect())
        }
    }

    #[test]
    fn test_dimension_drift_is_rejected() {
        let model = ShrinkingModel {
            info: ModelInfo {
                name: "shrinking".into(),
                max_sequence_length: 8,
            },
            calls: Default::default(),
        };
        let session = ModelSession::from_model("shrinking", Box::new(model), 2).unwrap();
        let err = session.encode("anything").unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 8,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_concurrent_callers_are_serialized() {
        let model = MockEmbedder::new(8);
        let stats = model.stats();
        let session = Arc::new(ModelSession::from_model("mock", Box::new(model), 1).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for j in 0..20 {
                        session.encode(&format!("{i}-{j}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.max_in_flight(), 1);
    }
}
