//! RocksDB wrapper for the document store.
//!
//! Provides:
//! - Read-write open (creating the database and collection if missing)
//! - Read-only open that never creates anything and tolerates a concurrent
//!   writer holding the database lock
//! - Count, full scan, delete-all and batch insert on one collection
//!
//! Keys are monotonic ULIDs, so a full scan returns documents in insertion
//! order.

use rocksdb::{ColumnFamily, IteratorMode, Options, WriteBatch, DB};
use serde_json::Value;
use tracing::{debug, info, warn};
use ulid::Generator;

use corpus_types::{Document, StoredDocument};

use crate::column_families::build_cf_descriptors;
use crate::error::StorageError;
use crate::location::StoreLocation;

/// Handle on one collection of one database.
pub struct Storage {
    db: DB,
    location: StoreLocation,
    read_only: bool,
}

impl Storage {
    /// Open for reading and writing, creating the database and collection.
    pub fn connect(location: &StoreLocation) -> Result<Self, StorageError> {
        let path = location.path();
        info!("Opening store at {:?}", path);

        std::fs::create_dir_all(&path).map_err(|e| connection_error(location, e))?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let existing = DB::list_cf(&Options::default(), &path).unwrap_or_default();
        let descriptors = build_cf_descriptors(&existing, &location.collection);
        let db = DB::open_cf_descriptors(&db_opts, &path, descriptors)
            .map_err(|e| connection_error(location, e))?;

        Ok(Self {
            db,
            location: location.clone(),
            read_only: false,
        })
    }

    /// Open an existing database read-only.
    ///
    /// Fails with a connection error if the database does not exist. A
    /// missing collection is not an error here; it surfaces from the first
    /// read as `CollectionNotFound`.
    pub fn connect_read_only(location: &StoreLocation) -> Result<Self, StorageError> {
        let path = location.path();
        debug!("Opening store read-only at {:?}", path);

        let existing =
            DB::list_cf(&Options::default(), &path).map_err(|e| connection_error(location, e))?;
        let db = DB::open_cf_for_read_only(&Options::default(), &path, &existing, false)
            .map_err(|e| connection_error(location, e))?;

        Ok(Self {
            db,
            location: location.clone(),
            read_only: true,
        })
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Cheap liveness probe against the open database.
    pub fn ping(&self) -> Result<(), StorageError> {
        self.db
            .property_value("rocksdb.estimate-num-keys")
            .map(|_| ())
            .map_err(|e| connection_error(&self.location, e))
    }

    fn collection(&self) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(&self.location.collection)
            .ok_or_else(|| StorageError::CollectionNotFound {
                collection: self.location.collection.clone(),
                database: self.location.path().display().to_string(),
            })
    }

    fn read_error(&self, e: impl ToString) -> StorageError {
        StorageError::Read {
            collection: self.location.collection.clone(),
            reason: e.to_string(),
        }
    }

    pub fn count_documents(&self) -> Result<u64, StorageError> {
        let cf = self.collection()?;
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| self.read_error(e))?;
            count += 1;
        }
        Ok(count)
    }

    /// Every document in insertion order.
    ///
    /// A record whose bytes are not JSON is returned with a null body rather
    /// than failing the scan.
    pub fn find_all(&self) -> Result<Vec<StoredDocument>, StorageError> {
        let cf = self.collection()?;
        let mut documents = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| self.read_error(e))?;
            let id = String::from_utf8_lossy(&key).to_string();
            let doc = match StoredDocument::from_bytes(id.clone(), &value) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(id = %id, error = %e, "Undecodable record, reading it as empty");
                    StoredDocument::new(id, Value::Null)
                }
            };
            documents.push(doc);
        }
        Ok(documents)
    }

    /// Delete every document in the collection. Returns how many were removed.
    pub fn delete_all(&self) -> Result<u64, StorageError> {
        let delete_error = |e: String| StorageError::Delete {
            collection: self.location.collection.clone(),
            reason: e,
        };

        let cf = self.collection()?;
        let mut batch = WriteBatch::default();
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, _) = item.map_err(|e| delete_error(e.to_string()))?;
            batch.delete_cf(cf, &key);
            count += 1;
        }

        if count > 0 {
            self.db
                .write(batch)
                .map_err(|e| delete_error(e.to_string()))?;
            debug!(count, collection = %self.location.collection, "Deleted documents");
        }
        Ok(count)
    }

    /// Insert all documents in one write batch. Returns the assigned ids in
    /// input order.
    pub fn insert_many(&self, documents: &[Document]) -> Result<Vec<String>, StorageError> {
        let insert_error = |e: String| StorageError::Insert {
            collection: self.location.collection.clone(),
            reason: e,
        };

        let cf = self.collection()?;
        let mut generator = Generator::new();
        let mut batch = WriteBatch::default();
        let mut ids = Vec::with_capacity(documents.len());

        for doc in documents {
            let id = generator
                .generate()
                .map_err(|e| insert_error(e.to_string()))?
                .to_string();
            let bytes = doc.to_bytes()?;
            batch.put_cf(cf, id.as_bytes(), &bytes);
            ids.push(id);
        }

        self.db
            .write(batch)
            .map_err(|e| insert_error(e.to_string()))?;
        debug!(count = ids.len(), collection = %self.location.collection, "Inserted documents");
        Ok(ids)
    }

    /// Flush the collection to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        let cf = self.collection()?;
        self.db
            .flush_cf(cf)
            .map_err(|e| connection_error(&self.location, e))
    }
}

fn connection_error(location: &StoreLocation, e: impl ToString) -> StorageError {
    StorageError::Connection {
        target: location.path().display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use corpus_types::CorpusEntry;
    use tempfile::TempDir;

    fn location(temp: &TempDir) -> StoreLocation {
        StoreLocation::parse(&temp.path().to_string_lossy(), "test_db", "documents").unwrap()
    }

    fn docs(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| {
                let entry = CorpusEntry::new(format!("title {i}"), format!("content {i}"), "cat");
                Document::from_entry(&entry, vec![i as f32; 4], Utc::now())
            })
            .collect()
    }

    #[test]
    fn test_connect_creates_collection() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::connect(&location(&temp)).unwrap();
        assert_eq!(storage.count_documents().unwrap(), 0);
        assert!(storage.ping().is_ok());
        assert!(!storage.is_read_only());
    }

    #[test]
    fn test_insert_preserves_order() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::connect(&location(&temp)).unwrap();

        let ids = storage.insert_many(&docs(50)).unwrap();
        assert_eq!(ids.len(), 50);

        let found = storage.find_all().unwrap();
        assert_eq!(found.len(), 50);
        for (i, doc) in found.iter().enumerate() {
            assert_eq!(doc.id, ids[i]);
            assert_eq!(doc.title(), Some(format!("title {i}").as_str()));
        }
    }

    #[test]
    fn test_delete_all() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::connect(&location(&temp)).unwrap();

        assert_eq!(storage.delete_all().unwrap(), 0);
        storage.insert_many(&docs(3)).unwrap();
        assert_eq!(storage.delete_all().unwrap(), 3);
        assert_eq!(storage.count_documents().unwrap(), 0);
    }

    #[test]
    fn test_read_only_missing_database_is_connection_error() {
        let temp = TempDir::new().unwrap();
        let err = Storage::connect_read_only(&location(&temp)).err().unwrap();
        assert!(err.is_connection());
        assert!(!location(&temp).path().exists());
    }

    #[test]
    fn test_read_only_sees_data_while_writer_is_open() {
        let temp = TempDir::new().unwrap();
        let writer = Storage::connect(&location(&temp)).unwrap();
        writer.insert_many(&docs(2)).unwrap();
        writer.flush().unwrap();

        let reader = Storage::connect_read_only(&location(&temp)).unwrap();
        assert!(reader.is_read_only());
        assert_eq!(reader.count_documents().unwrap(), 2);
    }

    #[test]
    fn test_read_only_missing_collection() {
        let temp = TempDir::new().unwrap();
        let loc = location(&temp);
        Storage::connect(&loc).unwrap();

        let other = StoreLocation {
            collection: "articles".to_string(),
            ..loc
        };
        let reader = Storage::connect_read_only(&other).unwrap();
        assert!(reader.ping().is_ok());
        assert!(matches!(
            reader.count_documents(),
            Err(StorageError::CollectionNotFound { .. })
        ));
    }

    #[test]
    fn test_reopen_with_second_collection() {
        let temp = TempDir::new().unwrap();
        let loc = location(&temp);
        {
            let storage = Storage::connect(&loc).unwrap();
            storage.insert_many(&docs(1)).unwrap();
        }
        let other = StoreLocation {
            collection: "articles".to_string(),
            ..loc.clone()
        };
        {
            let storage = Storage::connect(&other).unwrap();
            assert_eq!(storage.count_documents().unwrap(), 0);
        }
        let storage = Storage::connect(&loc).unwrap();
        assert_eq!(storage.count_documents().unwrap(), 1);
    }

    #[test]
    fn test_writes_through_read_only_handle_fail() {
        let temp = TempDir::new().unwrap();
        let loc = location(&temp);
        Storage::connect(&loc).unwrap();

        let reader = Storage::connect_read_only(&loc).unwrap();
        assert!(matches!(
            reader.insert_many(&docs(1)),
            Err(StorageError::Insert { .. })
        ));
    }

    #[test]
    fn test_undecodable_record_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::connect(&location(&temp)).unwrap();
        storage.insert_many(&docs(1)).unwrap();

        let cf = storage.collection().unwrap();
        storage.db.put_cf(cf, b"zzz-foreign", b"\x00not json").unwrap();

        let found = storage.find_all().unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].embedding_dimension(), Some(4));
        assert_eq!(found[1].id, "zzz-foreign");
        assert_eq!(found[1].body, Value::Null);
        assert_eq!(found[1].title(), None);
        assert!(!found[1].has_embedding());
    }
}
