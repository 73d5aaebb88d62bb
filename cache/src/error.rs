//! Cache error types.
//!
//! These never cross the cache boundary on the read path: callers of
//! [`crate::CacheAside`] see a miss, not an error.

use thiserror::Error;

/// Errors that can occur when talking to a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
