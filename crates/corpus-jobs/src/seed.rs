//! Corpus seeding job.
//!
//! Runs in four steps:
//! 1. Encode all contents in one order-preserving batch call
//! 2. Optionally delete every existing document
//! 3. Build complete documents only once every embedding exists
//! 4. Insert them in one batch write and re-query the collection count
//!
//! A model failure leaves the store untouched. The delete and the insert are
//! separate writes; if the process dies between them the collection is left
//! empty, which the auditor reports.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{info, warn};

use corpus_embeddings::ModelSession;
use corpus_storage::{DocumentStore, StorageError};
use corpus_types::{CorpusEntry, Document};

use crate::error::JobError;

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Documents deleted before inserting; `None` when clearing was skipped
    pub cleared: Option<u64>,
    /// Ids the store assigned, in corpus order
    pub inserted_ids: Vec<String>,
    /// Collection count re-queried after the insert
    pub stored_after: u64,
    /// Count the collection should hold after this run
    pub expected_after: u64,
    /// Embedding dimension written
    pub dimension: usize,
    /// Documents seeded per category
    pub categories: BTreeMap<String, usize>,
}

impl SeedReport {
    pub fn inserted(&self) -> usize {
        self.inserted_ids.len()
    }

    /// True when the re-queried count matches what this run should produce.
    pub fn is_consistent(&self) -> bool {
        self.stored_after == self.expected_after
    }
}

/// Seed `corpus` into `store`, replacing existing documents if
/// `clear_existing` is set.
pub fn seed<S: DocumentStore + ?Sized>(
    store: &S,
    session: &ModelSession,
    corpus: &[CorpusEntry],
    clear_existing: bool,
) -> Result<SeedReport, JobError> {
    let contents: Vec<&str> = corpus.iter().map(|e| e.content.as_str()).collect();
    let embeddings = session.encode_all(&contents)?;
    info!(count = embeddings.len(), dim = session.dimension(), "Generated embeddings");

    let (cleared, base) = if clear_existing {
        let deleted = store
            .delete_all()
            .map_err(|source| abort(store, source))?;
        if deleted > 0 {
            info!(deleted, "Cleared existing documents");
        }
        (Some(deleted), 0)
    } else {
        (None, store.count_documents()?)
    };

    let now = Utc::now();
    let documents: Vec<Document> = corpus
        .iter()
        .zip(embeddings)
        .map(|(entry, embedding)| Document::from_entry(entry, embedding, now))
        .collect();

    let inserted_ids = store
        .insert_many(&documents)
        .map_err(|source| abort(store, source))?;

    let stored_after = store.count_documents()?;
    let expected_after = base + inserted_ids.len() as u64;
    if stored_after != expected_after {
        warn!(
            stored_after,
            expected_after, "Collection count differs from what was seeded"
        );
    }

    let mut categories = BTreeMap::new();
    for entry in corpus {
        *categories.entry(entry.category.clone()).or_insert(0) += 1;
    }

    info!(inserted = inserted_ids.len(), stored_after, "Seeding complete");

    Ok(SeedReport {
        cleared,
        inserted_ids,
        stored_after,
        expected_after,
        dimension: session.dimension(),
        categories,
    })
}

fn abort<S: DocumentStore + ?Sized>(store: &S, source: StorageError) -> JobError {
    if source.is_connection() {
        return JobError::Storage(source);
    }
    JobError::WriteAborted {
        source,
        stored_after: store.count_documents().ok(),
    }
}
