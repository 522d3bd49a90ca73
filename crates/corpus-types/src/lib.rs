//! # corpus-types
//!
//! Shared domain types for the semantic corpus tools.
//!
//! - [`Document`]: a fully-formed record written by the seeder
//! - [`StoredDocument`]: a schema-less record as read back from the store
//! - [`CorpusEntry`]: one curated (title, content, category) input
//! - [`Settings`]: layered configuration shared by every binary entry point

pub mod config;
pub mod document;
pub mod error;

pub use config::{ModelSettings, ServiceSettings, Settings, StoreSettings, VerifySettings};
pub use document::{CorpusEntry, Document, StoredDocument};
pub use error::CorpusError;
