//! Document store for the semantic corpus tools.
//!
//! Provides RocksDB-backed storage with:
//! - One column family per collection, under one directory per database
//! - Read-write handles for the seeder and read-only snapshot handles for
//!   the auditor and verifier, so a concurrent writer never blocks them
//! - Single-`WriteBatch` bulk insert and delete
//! - The [`DocumentStore`] trait the batch jobs are written against

pub mod column_families;
pub mod db;
pub mod error;
pub mod location;
pub mod store;

pub use db::Storage;
pub use error::StorageError;
pub use location::StoreLocation;
pub use store::DocumentStore;
