//! # corpus-service
//!
//! HTTP embedding service. Wraps one shared [`ModelSession`] and exposes:
//!
//! - `GET /health`: model identifier and output dimension
//! - `POST /embed`: one text to one vector
//! - `POST /embed-batch`: many texts to many vectors, in input order
//!
//! Request bodies are validated explicitly so every malformed request gets a
//! 400 with an `{"error": ...}` body. No endpoint touches the document store.
//!
//! [`ModelSession`]: corpus_embeddings::ModelSession

pub mod error;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use request::{BatchInput, TextInput};
pub use server::{build_router, run_server, run_server_with_shutdown, serve, shutdown_signal};
pub use state::AppState;
