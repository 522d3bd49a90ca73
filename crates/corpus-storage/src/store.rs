//! The store interface the batch jobs are written against.

use corpus_types::{Document, StoredDocument};

use crate::db::Storage;
use crate::error::StorageError;

/// Operations the seeder, auditor and verifier need from a collection.
pub trait DocumentStore {
    fn ping(&self) -> Result<(), StorageError>;

    fn count_documents(&self) -> Result<u64, StorageError>;

    fn find_all(&self) -> Result<Vec<StoredDocument>, StorageError>;

    fn delete_all(&self) -> Result<u64, StorageError>;

    fn insert_many(&self, documents: &[Document]) -> Result<Vec<String>, StorageError>;
}

impl DocumentStore for Storage {
    fn ping(&self) -> Result<(), StorageError> {
        Storage::ping(self)
    }

    fn count_documents(&self) -> Result<u64, StorageError> {
        Storage::count_documents(self)
    }

    fn find_all(&self) -> Result<Vec<StoredDocument>, StorageError> {
        Storage::find_all(self)
    }

    fn delete_all(&self) -> Result<u64, StorageError> {
        Storage::delete_all(self)
    }

    fn insert_many(&self, documents: &[Document]) -> Result<Vec<String>, StorageError> {
        Storage::insert_many(self, documents)
    }
}
