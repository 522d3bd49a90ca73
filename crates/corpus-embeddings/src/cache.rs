//! Model file resolution and caching.
//!
//! An identifier is either a local directory that already holds the model
//! files, or a HuggingFace Hub repository id whose files are downloaded once
//! into the cache directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::EmbeddingError;

/// Required model files
pub const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Model cache configuration
#[derive(Debug, Clone)]
pub struct ModelCache {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Hub repository id or local model directory
    pub identifier: String,
}

impl ModelCache {
    pub fn new(cache_dir: impl Into<PathBuf>, identifier: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            identifier: identifier.into(),
        }
    }

    /// Cache under the platform cache directory.
    pub fn with_default_dir(identifier: impl Into<String>) -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("semantic-corpus")
            .join("models");
        Self::new(cache_dir, identifier)
    }

    /// Directory the model files are read from.
    pub fn model_dir(&self) -> PathBuf {
        let local = Path::new(&self.identifier);
        if local.is_dir() {
            return local.to_path_buf();
        }
        self.cache_dir.join(self.identifier.replace('/', "_"))
    }

    /// Check if all model files are present
    pub fn is_cached(&self) -> bool {
        let model_dir = self.model_dir();
        MODEL_FILES.iter().all(|f| model_dir.join(f).exists())
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.model_dir().join(filename)
    }
}

/// Paths to model files
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Get or download model files.
///
/// Fails with `ModelUnavailable` when the files are neither present locally
/// nor downloadable under the identifier.
pub fn get_or_download_model(cache: &ModelCache) -> Result<ModelPaths, EmbeddingError> {
    if cache.identifier.trim().is_empty() {
        return Err(EmbeddingError::unavailable("", "empty model identifier"));
    }

    let model_dir = cache.model_dir();

    if cache.is_cached() {
        debug!(path = ?model_dir, "Using cached model");
    } else {
        info!(model = %cache.identifier, "Downloading model files...");
        download_model_files(cache)?;
    }

    Ok(ModelPaths {
        config: model_dir.join("config.json"),
        tokenizer: model_dir.join("tokenizer.json"),
        weights: model_dir.join("model.safetensors"),
    })
}

fn download_model_files(cache: &ModelCache) -> Result<(), EmbeddingError> {
    use hf_hub::api::sync::Api;

    let unavailable = |reason: String| EmbeddingError::unavailable(&cache.identifier, reason);

    let model_dir = cache.model_dir();
    std::fs::create_dir_all(&model_dir)
        .map_err(|e| unavailable(format!("cannot create {}: {}", model_dir.display(), e)))?;

    let api = Api::new().map_err(|e| unavailable(e.to_string()))?;
    let repo = api.model(cache.identifier.clone());

    for filename in MODEL_FILES {
        info!(file = filename, "Downloading...");
        let source_path = repo
            .get(filename)
            .map_err(|e| unavailable(format!("{}: {}", filename, e)))?;

        let dest_path = cache.file_path(filename);
        std::fs::copy(&source_path, &dest_path)
            .map_err(|e| unavailable(format!("cannot copy {}: {}", filename, e)))?;
        debug!(file = filename, "Downloaded to {:?}", dest_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_ids_map_into_cache_dir() {
        let temp = TempDir::new().unwrap();
        let cache = ModelCache::new(temp.path(), "sentence-transformers/all-MiniLM-L6-v2");
        assert_eq!(
            cache.model_dir(),
            temp.path().join("sentence-transformers_all-MiniLM-L6-v2")
        );
        assert!(!cache.is_cached());
    }

    #[test]
    fn test_local_directory_identifier() {
        let cache_dir = TempDir::new().unwrap();
        let model_dir = TempDir::new().unwrap();
        for file in MODEL_FILES {
            std::fs::write(model_dir.path().join(file), b"{}").unwrap();
        }

        let cache = ModelCache::new(cache_dir.path(), model_dir.path().to_string_lossy());
        assert_eq!(cache.model_dir(), model_dir.path());
        assert!(cache.is_cached());

        let paths = get_or_download_model(&cache).unwrap();
        assert_eq!(paths.tokenizer, model_dir.path().join("tokenizer.json"));
    }

    #[test]
    fn test_empty_identifier_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let cache = ModelCache::new(temp.path(), "  ");
        let err = get_or_download_model(&cache).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_unwritable_cache_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let cache = ModelCache::new(&blocker, "sentence-transformers/all-MiniLM-L6-v2");
        let err = get_or_download_model(&cache).unwrap_err();
        match err {
            EmbeddingError::ModelUnavailable { model, reason } => {
                assert_eq!(model, "sentence-transformers/all-MiniLM-L6-v2");
                assert!(reason.starts_with("cannot create"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
