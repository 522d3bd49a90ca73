//! # corpus-embeddings
//!
//! Embedding model host for the semantic corpus tools.
//!
//! One [`ModelSession`] is built per process. It owns the loaded model and
//! the output dimension D, which is measured once by probe-encoding a
//! sentinel string. Every vector the session hands out has length D, and
//! batch encoding preserves input order regardless of how texts are grouped
//! into forward passes.
//!
//! ## Features
//! - Local inference via Candle (all-MiniLM-L6-v2 by default, 384 dimensions)
//! - Model files resolved from a local directory or downloaded and cached
//! - Serialized access to the model across threads
//! - Deterministic [`MockEmbedder`] for tests that cannot download a model

pub mod cache;
pub mod candle;
pub mod error;
pub mod mock;
pub mod model;
pub mod session;

pub use crate::candle::CandleEmbedder;
pub use cache::{get_or_download_model, ModelCache, ModelPaths, MODEL_FILES};
pub use error::EmbeddingError;
pub use mock::{MockEmbedder, MockStats};
pub use model::{Embedding, EmbeddingModel, ModelInfo};
pub use session::{ModelSession, DEFAULT_BATCH_SIZE, PROBE_TEXT};
