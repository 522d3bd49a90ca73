//! Corpus consistency audit.
//!
//! Classifies every stored document by whether it carries a usable
//! embedding, gathers the set of embedding lengths seen, and turns that into
//! an ordered list of remediation steps. [`audit`] is pure; [`audit_store`]
//! only adds the read.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use corpus_storage::DocumentStore;
use corpus_types::StoredDocument;

use crate::error::JobError;

const UNTITLED: &str = "No Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    /// The collection held no documents at all
    NoDocuments,
    /// At least one document was examined
    Checked,
}

/// Per-document finding, numbered from 1 in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStatus {
    pub position: usize,
    pub title: String,
    /// Embedding length, or `None` when the embedding is missing or unusable
    pub dimension: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Some documents lack embeddings; clear and re-seed
    Reseed { missing: usize },
    /// No stored embedding has the dimension the index expects
    CheckModelConfiguration {
        expected: usize,
        observed: Vec<usize>,
    },
    /// Data looks healthy; the problem is likely on the query side
    AdjustQuery,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Reseed { missing } => write!(
                f,
                "{missing} document(s) missing embeddings\n   -> Clear the collection and run `corpus seed`"
            ),
            Recommendation::CheckModelConfiguration { expected, observed } => {
                let found: Vec<String> = observed.iter().map(|d| d.to_string()).collect();
                write!(
                    f,
                    "Embedding dimension mismatch\n   -> Expected: {expected}\n   -> Found: {}\n   -> Check model.identifier in your configuration",
                    found.join(", ")
                )
            }
            Recommendation::AdjustQuery => write!(
                f,
                "All documents have valid embeddings\n   -> Try lowering the similarity threshold to 0.0\n   -> Check whether the search query is too specific"
            ),
        }
    }
}

/// Derived, non-persisted summary of embedding health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub status: AuditStatus,
    pub expected_dimension: usize,
    pub documents: Vec<DocumentStatus>,
    pub with_embedding: usize,
    pub without_embedding: usize,
    pub observed_dimensions: BTreeSet<usize>,
    pub recommendations: Vec<Recommendation>,
}

impl ConsistencyReport {
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    pub fn percent_with(&self) -> f64 {
        percent(self.with_embedding, self.total())
    }

    pub fn percent_without(&self) -> f64 {
        percent(self.without_embedding, self.total())
    }

    /// Smallest and largest embedding length seen.
    pub fn dimension_range(&self) -> Option<(usize, usize)> {
        let min = self.observed_dimensions.first()?;
        let max = self.observed_dimensions.last()?;
        Some((*min, *max))
    }

    /// True when embeddings exist but none has the expected length.
    pub fn dimension_mismatch(&self) -> bool {
        !self.observed_dimensions.is_empty()
            && !self.observed_dimensions.contains(&self.expected_dimension)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Audit `documents` against the dimension the vector index expects.
pub fn audit(documents: &[StoredDocument], expected_dimension: usize) -> ConsistencyReport {
    if documents.is_empty() {
        return ConsistencyReport {
            status: AuditStatus::NoDocuments,
            expected_dimension,
            documents: Vec::new(),
            with_embedding: 0,
            without_embedding: 0,
            observed_dimensions: BTreeSet::new(),
            recommendations: Vec::new(),
        };
    }

    let statuses: Vec<DocumentStatus> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| DocumentStatus {
            position: i + 1,
            title: doc.title().unwrap_or(UNTITLED).to_string(),
            dimension: doc.embedding_dimension(),
        })
        .collect();

    let observed_dimensions: BTreeSet<usize> =
        statuses.iter().filter_map(|s| s.dimension).collect();
    let with_embedding = statuses.iter().filter(|s| s.dimension.is_some()).count();
    let without_embedding = statuses.len() - with_embedding;

    let mut report = ConsistencyReport {
        status: AuditStatus::Checked,
        expected_dimension,
        documents: statuses,
        with_embedding,
        without_embedding,
        observed_dimensions,
        recommendations: Vec::new(),
    };
    report.recommendations = recommend(&report);
    report
}

/// Read the whole collection and audit it.
pub fn audit_store<S: DocumentStore + ?Sized>(
    store: &S,
    expected_dimension: usize,
) -> Result<ConsistencyReport, JobError> {
    let documents = store.find_all()?;
    debug!(count = documents.len(), "Fetched documents for audit");
    Ok(audit(&documents, expected_dimension))
}

fn recommend(report: &ConsistencyReport) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    if report.without_embedding > 0 {
        recommendations.push(Recommendation::Reseed {
            missing: report.without_embedding,
        });
    }
    if report.dimension_mismatch() {
        recommendations.push(Recommendation::CheckModelConfiguration {
            expected: report.expected_dimension,
            observed: report.observed_dimensions.iter().copied().collect(),
        });
    }
    if recommendations.is_empty() {
        recommendations.push(Recommendation::AdjustQuery);
    }
    recommendations
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == AuditStatus::NoDocuments {
            return writeln!(f, "WARNING: No documents in collection!\n   -> Run `corpus seed` to load the sample corpus");
        }

        writeln!(f, "EMBEDDING ANALYSIS")?;
        for doc in &self.documents {
            match doc.dimension {
                Some(dim) => {
                    writeln!(f, "   [ok] Document {}: {}", doc.position, doc.title)?;
                    writeln!(f, "      -> ({dim} dimensions)")?;
                }
                None => {
                    writeln!(f, "   [!!] Document {}: {}", doc.position, doc.title)?;
                    writeln!(f, "      -> NO EMBEDDING")?;
                }
            }
        }

        writeln!(f, "\nSUMMARY")?;
        writeln!(f, "   Total Documents: {}", self.total())?;
        writeln!(
            f,
            "   With Embeddings: {} ({:.1}%)",
            self.with_embedding,
            self.percent_with()
        )?;
        writeln!(
            f,
            "   Without Embeddings: {} ({:.1}%)",
            self.without_embedding,
            self.percent_without()
        )?;
        if let Some((min, max)) = self.dimension_range() {
            writeln!(f, "   Embedding Dimensions: {min} - {max}")?;
            writeln!(f, "   Expected: {}", self.expected_dimension)?;
            if self.dimension_mismatch() {
                writeln!(
                    f,
                    "\n   WARNING: Embedding dimensions don't match expected {}!\n   -> This may cause search issues",
                    self.expected_dimension
                )?;
            }
        }

        writeln!(f, "\nRECOMMENDATIONS")?;
        for (i, rec) in self.recommendations.iter().enumerate() {
            writeln!(f, "   {}. {}", i + 1, rec)?;
        }
        Ok(())
    }
}
