//! Provider-agnostic response cache.
//!
//! Free-tier quota is the scarcest resource in the system, so every
//! successful response is cached and a hit bypasses provider selection, rate
//! limiting and statistics entirely. Keys are [`Fingerprint`]s — capability
//! plus input, never the provider — so the second provider benefits from the
//! first one's answers.
//!
//! Entries are replace-only and carry their own TTL; moka's expiry policy
//! treats expired entries as absent on lookup (lazy eviction is sufficient).
//!
//! # Future extensibility: shared/distributed caching
//!
//! The key design is backend-agnostic (a stable content hash), so a
//! redis-backed store for cross-process deduplication would slot in behind a
//! small get/put trait without touching callers.

use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;

use super::fingerprint::Fingerprint;
use crate::telemetry;
use crate::types::{Capability, NormalizedResult};

/// Configuration for the response cache.
///
/// ```rust
/// # use huginn::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Default time-to-live for cached entries. Default: 24 hours.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the default time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// One cached response with its own TTL.
#[derive(Clone, Debug)]
struct CacheEntry {
    value: NormalizedResult,
    ttl: Duration,
}

/// Expiry policy reading each entry's own TTL.
struct PerEntryExpiry;

impl Expiry<Fingerprint, CacheEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &Fingerprint,
        entry: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory response cache shared across all providers.
pub struct ResponseCache {
    cache: Cache<Fingerprint, CacheEntry>,
    default_ttl: Duration,
}

impl ResponseCache {
    /// Create a new response cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryExpiry)
            .build();
        Self {
            cache,
            default_ttl: config.ttl,
        }
    }

    /// Look up a cached response.
    ///
    /// Returns `None` on miss or expiry. Emits hit/miss metrics labelled by
    /// capability.
    pub async fn get(
        &self,
        fingerprint: &Fingerprint,
        capability: Capability,
    ) -> Option<NormalizedResult> {
        match self.cache.get(fingerprint).await {
            Some(entry) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL,
                    "capability" => capability.as_str())
                .increment(1);
                Some(entry.value)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL,
                    "capability" => capability.as_str())
                .increment(1);
                None
            }
        }
    }

    /// Insert a response, replacing any previous entry wholesale.
    ///
    /// `ttl` of `None` uses the cache-wide default.
    pub async fn put(
        &self,
        fingerprint: Fingerprint,
        value: NormalizedResult,
        ttl: Option<Duration>,
    ) {
        let entry = CacheEntry {
            value,
            ttl: ttl.unwrap_or(self.default_ttl),
        };
        self.cache.insert(fingerprint, entry).await;
    }
}
