//! Error types for analytics operations.
//!
//! "No data" is never an error: empty collections and absent records are
//! ordinary return values.

use thiserror::Error;

/// Errors surfaced by the analytics engines and service.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Caller contract violation (bad period tag, malformed identifier). Not retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The persistence layer failed; surfaced to the caller without retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for analytics operations; uses [`AnalyticsError`].
pub type Result<T> = std::result::Result<T, AnalyticsError>;
