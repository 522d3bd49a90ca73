//! Storage layer error types.
//!
//! Every variant names the resource it failed against so an operator can
//! act on the message alone.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// The store could not be reached or opened
    #[error("Connection error: {target}: {reason}")]
    Connection { target: String, reason: String },

    /// The database exists but the collection does not
    #[error("Collection '{collection}' not found in {database}")]
    CollectionNotFound { collection: String, database: String },

    /// A batch insert was rejected
    #[error("Insert into '{collection}' failed: {reason}")]
    Insert { collection: String, reason: String },

    /// A delete was rejected
    #[error("Delete from '{collection}' failed: {reason}")]
    Delete { collection: String, reason: String },

    /// Reading documents failed
    #[error("Read from '{collection}' failed: {reason}")]
    Read { collection: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StorageError::Connection { .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
