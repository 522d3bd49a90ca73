//! Error types for the batch jobs.

use thiserror::Error;

use corpus_embeddings::EmbeddingError;
use corpus_storage::StorageError;

#[derive(Debug, Error)]
pub enum JobError {
    /// The store could not be opened or read
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Encoding failed; nothing was written
    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// A delete or insert was rejected part way through the job
    #[error("{source} (documents in collection afterwards: {})", display_count(.stored_after))]
    WriteAborted {
        source: StorageError,
        stored_after: Option<u64>,
    },
}

fn display_count(count: &Option<u64>) -> String {
    count.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl JobError {
    /// True when the store itself was unreachable.
    pub fn is_connection(&self) -> bool {
        match self {
            JobError::Storage(e) | JobError::WriteAborted { source: e, .. } => e.is_connection(),
            JobError::Embedding(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_aborted_reports_post_state() {
        let err = JobError::WriteAborted {
            source: StorageError::Insert {
                collection: "documents".to_string(),
                reason: "disk full".to_string(),
            },
            stored_after: Some(0),
        };
        let msg = err.to_string();
        assert!(msg.contains("Insert into 'documents' failed: disk full"));
        assert!(msg.contains("afterwards: 0"));
        assert!(!err.is_connection());
    }

    #[test]
    fn test_connection_error_detected() {
        let err = JobError::from(StorageError::Connection {
            target: "/nowhere".to_string(),
            reason: "no such directory".to_string(),
        });
        assert!(err.is_connection());
    }
}
