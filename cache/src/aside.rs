//! Cache-aside protocol: look up first, compute and store on a miss.
//!
//! Caching here is an optimization, never a correctness dependency: a failed
//! read is a miss, a failed write is logged and swallowed, and the freshly
//! computed value is returned to the caller either way.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::store::CacheStore;

/// Default entry lifetime (20 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(1200);

/// Builds a cache key from namespace, chat id and period tag, e.g.
/// `stats:42:week`. Distinct namespaces keep query kinds from colliding.
pub fn cache_key(namespace: &str, chat_id: i64, period: &str) -> String {
    format!("{}:{}:{}", namespace, chat_id, period)
}

/// Get-or-compute-and-store wrapper around a [`CacheStore`].
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    /// Returns the cached value for `key`, or runs `compute`, stores its
    /// result with the default TTL, and returns it.
    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute_if(key, compute, |_| true).await
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but only writes the
    /// computed value back when `cache_if` holds for it. Used to keep
    /// degenerate results (e.g. an empty word cloud) out of the cache.
    pub async fn get_or_compute_if<T, E, F, Fut, P>(
        &self,
        key: &str,
        compute: F,
        cache_if: P,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnOnce(&T) -> bool,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key, error = %e, "cache entry undecodable, recomputing");
                }
            },
            Ok(None) => debug!(key, "cache miss"),
            Err(e) => warn!(key, error = %e, "cache read failed, treating as miss"),
        }

        let value = compute().await?;

        if cache_if(&value) {
            match serde_json::to_string(&value) {
                Ok(raw) => {
                    if let Err(e) = self.store.set(key, &raw, self.default_ttl).await {
                        warn!(key, error = %e, "cache write failed, returning computed value");
                    }
                }
                Err(e) => warn!(key, error = %e, "cache serialization failed, not stored"),
            }
        }

        Ok(value)
    }

    /// Removes all entries whose key starts with `prefix`; returns how many
    /// were removed. Backend failures are logged and reported as zero.
    pub async fn invalidate_prefix(&self, prefix: &str) -> u64 {
        match self.store.delete_by_prefix(prefix).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(prefix, error = %e, "cache invalidation failed");
                0
            }
        }
    }
}
