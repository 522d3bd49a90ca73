//! Embedding error types.

use thiserror::Error;

/// Errors that can occur while loading or running the embedding model.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model identifier could not be resolved or loaded
    #[error("Model unavailable: {model}: {reason}")]
    ModelUnavailable { model: String, reason: String },

    /// Candle model error
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),

    /// Tokenizer error
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A vector came back with a length other than the session's dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The model returned a different number of vectors than texts given
    #[error("Model returned {actual} embeddings for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },

    /// A thread panicked while holding the model
    #[error("Model session poisoned")]
    Poisoned,
}

impl EmbeddingError {
    pub fn unavailable(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
            reason: reason.to_string(),
        }
    }
}
