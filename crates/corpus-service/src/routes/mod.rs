//! HTTP route handlers
//!
//! - `health`: liveness and model metadata
//! - `embed`: single and batch encoding

pub mod embed;
pub mod health;

use crate::error::ApiError;

/// Fallback for undefined routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a known route called with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
