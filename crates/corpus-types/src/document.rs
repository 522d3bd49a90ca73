//! Document records.
//!
//! The seeder writes typed [`Document`]s. Everything that reads the store
//! back goes through [`StoredDocument`], which keeps the raw JSON so that
//! structural problems (a missing or malformed `embedding`) are observed at
//! read time instead of being rejected by deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One curated corpus input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl CorpusEntry {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }
}

/// A fully-formed document ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub category: String,

    /// Embedding of `content`; absent until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a document from a corpus entry and its computed embedding.
    pub fn from_entry(entry: &CorpusEntry, embedding: Vec<f32>, now: DateTime<Utc>) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            category: entry.category.clone(),
            embedding: Some(embedding),
            created_at: now,
            updated_at: now,
        }
    }

    /// Serialize to JSON bytes for storage
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A record read back from the store, without any assumed schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned identifier
    pub id: String,
    /// Raw record body
    pub body: Value,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// Decode from the stored JSON bytes.
    pub fn from_bytes(id: impl Into<String>, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, serde_json::from_slice(bytes)?))
    }

    pub fn title(&self) -> Option<&str> {
        self.body.get("title").and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.body.get("content").and_then(Value::as_str)
    }

    pub fn category(&self) -> Option<&str> {
        self.body.get("category").and_then(Value::as_str)
    }

    /// Length of the embedding when it is present, an array, and non-empty.
    pub fn embedding_dimension(&self) -> Option<usize> {
        match self.body.get("embedding") {
            Some(Value::Array(values)) if !values.is_empty() => Some(values.len()),
            _ => None,
        }
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding_dimension().is_some()
    }

    /// The (title, content, category) triple, if all three are strings.
    pub fn entry(&self) -> Option<CorpusEntry> {
        Some(CorpusEntry::new(self.title()?, self.content()?, self.category()?))
    }
}
