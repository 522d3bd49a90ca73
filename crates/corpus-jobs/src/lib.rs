//! # corpus-jobs
//!
//! One-shot batch jobs over the document store:
//!
//! - [`seed`]: full-replace (or append) load of a corpus with embeddings
//! - [`audit`]: read-only embedding presence and dimension report
//! - [`verify`]: independent readiness checks for toolchain, configuration,
//!   store and model
//!
//! Every job is safe to rerun in full. Nothing here retries.

pub mod audit;
pub mod corpus;
pub mod error;
pub mod seed;
pub mod verify;

pub use audit::{audit, audit_store, AuditStatus, ConsistencyReport, DocumentStatus, Recommendation};
pub use corpus::builtin_corpus;
pub use error::JobError;
pub use seed::{seed, SeedReport};
pub use verify::{Check, CheckResult, ModelLoader, ReadinessVerifier, VerifyReport};
