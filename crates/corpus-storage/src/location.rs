//! Connection string parsing.
//!
//! `rocksdb:///var/lib/corpus` and `/var/lib/corpus` name the same store
//! root. A database is a directory under the root; a collection is a column
//! family inside it.

use std::fmt;
use std::path::PathBuf;

use corpus_types::config::expand_home;
use corpus_types::StoreSettings;

use crate::error::StorageError;

const SCHEMES: &[&str] = &["rocksdb://", "file://"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub root: PathBuf,
    pub database: String,
    pub collection: String,
}

impl StoreLocation {
    pub fn parse(uri: &str, database: &str, collection: &str) -> Result<Self, StorageError> {
        let uri = uri.trim();
        let connection = |reason: &str| StorageError::Connection {
            target: uri.to_string(),
            reason: reason.to_string(),
        };

        if uri.is_empty() {
            return Err(connection("empty connection string"));
        }

        let path = match SCHEMES.iter().find_map(|s| uri.strip_prefix(s)) {
            Some(rest) => rest,
            None if uri.contains("://") => return Err(connection("unsupported scheme")),
            None => uri,
        };
        if path.is_empty() {
            return Err(connection("connection string has no path"));
        }

        if database.trim().is_empty() || database.contains(['/', '\\']) || database == ".." {
            return Err(connection(&format!("invalid database name '{}'", database)));
        }
        if collection.trim().is_empty() {
            return Err(connection("empty collection name"));
        }

        Ok(Self {
            root: expand_home(path),
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    pub fn from_settings(settings: &StoreSettings) -> Result<Self, StorageError> {
        Self::parse(&settings.uri, &settings.database, &settings.collection)
    }

    /// Directory holding the database
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.database)
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.path().display(), self.collection)
    }
}
