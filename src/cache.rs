//! Shared expiring cache for registry results and fetched files
//!
//! One `ResultCache` is constructed by the caller and handed to every
//! registry adapter and the resolver. Keys are namespaced by source
//! (`nuget:`, `npm:`, `android:`, `maven:`, `cocoapods:`, `file:`).

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::update::VersionTracks;

/// Default TTL for cache entries (1 hour)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A cached value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    /// A single resolved version
    Version(String),
    /// An ordered version list
    Versions(Vec<String>),
    /// NuGet stable/preview pair
    Tracks(VersionTracks),
    /// Raw text, e.g. a fetched build file
    Text(String),
}

impl CacheValue {
    pub fn as_version(&self) -> Option<&str> {
        match self {
            CacheValue::Version(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_versions(&self) -> Option<&[String]> {
        match self {
            CacheValue::Versions(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tracks(&self) -> Option<&VersionTracks> {
        match self {
            CacheValue::Tracks(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CacheValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    value: CacheValue,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

struct Inner {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
    disposed: AtomicBool,
}

/// In-memory TTL cache using DashMap for thread-safety
///
/// Cloning is cheap and every clone shares the same entries.
#[derive(Clone)]
pub struct ResultCache {
    inner: Arc<Inner>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResultCache {
    /// Create a cache whose entries live for `default_ttl` unless set otherwise
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: DashMap::new(),
                default_ttl,
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// TTL applied by `set(.., None)`
    pub fn default_ttl(&self) -> Duration {
        self.inner.default_ttl
    }

    /// Get a live value
    ///
    /// An expired entry reads as absent and is removed.
    pub fn try_get(&self, key: &str) -> Option<CacheValue> {
        if self.is_disposed() {
            return None;
        }
        {
            let entry = self.inner.entries.get(key)?;
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        self.inner
            .entries
            .remove_if(key, |_, entry| entry.is_expired());
        None
    }

    /// Store a value, replacing any previous entry for the key
    pub fn set(&self, key: impl Into<String>, value: CacheValue, ttl: Option<Duration>) {
        if self.is_disposed() {
            return;
        }
        self.inner.entries.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl: ttl.unwrap_or(self.inner.default_ttl),
            },
        );
    }

    /// Return the cached value or run `fetch` and store its success
    ///
    /// Errors are returned as-is and never cached. No map guard is held
    /// while `fetch` runs, so concurrent misses on one key may both fetch;
    /// the last writer wins.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<CacheValue, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CacheValue, E>>,
    {
        if let Some(value) = self.try_get(key) {
            debug!("cache hit: {}", key);
            return Ok(value);
        }

        debug!("cache miss: {}", key);
        let value = fetch().await?;
        self.set(key, value.clone(), None);
        Ok(value)
    }

    /// Remove all expired entries
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.inner.entries.len();
        self.inner.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.inner.entries.len();
        if removed > 0 {
            debug!(
                "purged {} expired cache entries ({} remaining)",
                removed,
                self.inner.entries.len()
            );
        }
        removed
    }

    /// Number of stored entries (including expired ones not yet purged)
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Drop all entries; afterwards every read misses and every write is ignored
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        self.inner.entries.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }
}
