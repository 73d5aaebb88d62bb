//! CacheStore trait: the primitives consumed from a cache backend.

use std::time::Duration;

use async_trait::async_trait;

use super::error::CacheError;

/// Async key-value cache with per-entry TTL. Entries are replaced wholesale,
/// never updated in place.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value for the key, or None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    /// Stores the value under the key; it expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
    /// Removes the key; returns true if an entry was removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
    /// Removes all keys starting with `prefix`; returns how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError>;
}
