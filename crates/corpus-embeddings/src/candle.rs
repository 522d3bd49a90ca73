//! Candle-based sentence embedder.
//!
//! Runs a BERT-family sentence-transformer on CPU, mean-pools the token
//! states under the attention mask and normalizes to unit length.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::cache::{get_or_download_model, ModelCache, ModelPaths};
use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Maximum sequence length
pub const MAX_SEQ_LENGTH: usize = 256;

pub struct CandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    info: ModelInfo,
}

impl CandleEmbedder {
    /// Resolve the model through the cache (downloading if needed) and load it.
    pub fn load(cache: &ModelCache) -> Result<Self, EmbeddingError> {
        let as_unavailable = |e: EmbeddingError| match e {
            EmbeddingError::ModelUnavailable { .. } => e,
            other => EmbeddingError::unavailable(&cache.identifier, other),
        };
        let paths = get_or_download_model(cache).map_err(as_unavailable)?;
        Self::load_from_paths(&cache.identifier, &paths).map_err(as_unavailable)
    }

    pub fn load_from_paths(name: &str, paths: &ModelPaths) -> Result<Self, EmbeddingError> {
        info!(model = name, "Loading embedding model...");

        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&paths.config)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| EmbeddingError::unavailable(name, format!("invalid config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&paths.tokenizer)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let vb = load_weights(&paths.weights, &device)?;
        let model = BertModel::load(vb, &config)?;

        info!(model = name, max_seq = MAX_SEQ_LENGTH, "Model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            info: ModelInfo {
                name: name.to_string(),
                max_sequence_length: MAX_SEQ_LENGTH,
            },
        })
    }

    /// Mean of token embeddings, padding excluded.
    fn mean_pooling(
        &self,
        embeddings: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor, EmbeddingError> {
        let mask = attention_mask
            .unsqueeze(2)?
            .broadcast_as(embeddings.shape())?
            .to_dtype(DType::F32)?;

        let sum = embeddings.broadcast_mul(&mask)?.sum(1)?;
        let token_counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;

        Ok(sum.broadcast_div(&token_counts)?)
    }
}

fn load_weights<'a>(weights: &Path, device: &Device) -> Result<VarBuilder<'a>, EmbeddingError> {
    // SAFETY: the safetensors file is only read, and the cache directory is
    // not rewritten while a process holds the mapping.
    let vb = unsafe {
        VarBuilder::from_mmaped_safetensors(&[weights.to_path_buf()], DType::F32, device)?
    };
    Ok(vb)
}

impl EmbeddingModel for CandleEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(count = texts.len(), "Embedding batch");

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(MAX_SEQ_LENGTH);

        let batch_size = encodings.len();
        let mut input_ids: Vec<u32> = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask: Vec<u32> = Vec::with_capacity(batch_size * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let len = ids.len().min(max_len);

            input_ids.extend_from_slice(&ids[..len]);
            input_ids.extend(std::iter::repeat(0).take(max_len - len));
            attention_mask.extend_from_slice(&mask[..len]);
            attention_mask.extend(std::iter::repeat(0).take(max_len - len));
        }

        let input_ids = Tensor::from_vec(input_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;

        let output = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled: Vec<Vec<f32>> = self.mean_pooling(&output, &attention_mask)?.to_vec2()?;

        Ok(pooled.into_iter().map(Embedding::normalized).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

    fn load() -> CandleEmbedder {
        CandleEmbedder::load(&ModelCache::with_default_dir(MODEL)).unwrap()
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_embed_single() {
        let emb = load().embed("hello world").unwrap();
        assert_eq!(emb.dimension(), 384);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_batch_matches_single() {
        let embedder = load();
        let texts = ["a", "a much longer sentence that needs padding in a batch", "c"];
        let batch = embedder.embed_batch(&texts).unwrap();
        for (text, batched) in texts.iter().zip(&batch) {
            let single = embedder.embed(text).unwrap();
            assert!(single.cosine_similarity(batched) > 0.999);
        }
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_similar_texts_high_similarity() {
        let embedder = load();
        let emb1 = embedder.embed("The cat sat on the mat").unwrap();
        let emb2 = embedder.embed("A cat is sitting on a mat").unwrap();
        let emb3 = embedder.embed("Python programming language").unwrap();

        assert!(emb1.cosine_similarity(&emb2) > emb1.cosine_similarity(&emb3));
    }

    #[test]
    fn test_corrupt_model_dir_is_unavailable() {
        let cache_dir = tempfile::TempDir::new().unwrap();
        let model_dir = tempfile::TempDir::new().unwrap();
        for file in crate::cache::MODEL_FILES {
            std::fs::write(model_dir.path().join(file), b"not a model").unwrap();
        }

        let cache = ModelCache::new(cache_dir.path(), model_dir.path().to_string_lossy());
        let result = CandleEmbedder::load(&cache);
        assert!(matches!(
            result,
            Err(EmbeddingError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_unwritable_cache_dir_is_unavailable() {
        let temp = tempfile::TempDir::new().unwrap();
        let blocker = temp.path().join("cache-file");
        std::fs::write(&blocker, b"file").unwrap();

        let result = CandleEmbedder::load(&ModelCache::new(&blocker, MODEL));
        assert!(matches!(
            result,
            Err(EmbeddingError::ModelUnavailable { .. })
        ));
    }
}
