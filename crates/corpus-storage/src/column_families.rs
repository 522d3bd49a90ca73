//! Column family setup.
//!
//! Each collection is a column family. Document bodies are JSON with long
//! float arrays, so collections use Zstd compression.

use rocksdb::{ColumnFamilyDescriptor, Options, DEFAULT_COLUMN_FAMILY_NAME};

fn collection_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Descriptors for every existing column family plus `collection`.
///
/// RocksDB refuses a read-write open that omits an existing family, so the
/// families already on disk are always carried along.
pub fn build_cf_descriptors(existing: &[String], collection: &str) -> Vec<ColumnFamilyDescriptor> {
    let mut names: Vec<&str> = existing.iter().map(String::as_str).collect();
    if !names.contains(&collection) {
        names.push(collection);
    }
    names
        .into_iter()
        .filter(|name| *name != DEFAULT_COLUMN_FAMILY_NAME)
        .map(|name| ColumnFamilyDescriptor::new(name, collection_options()))
        .collect()
}
