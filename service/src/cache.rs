//! Time-boxed query cache in front of a [`BillsApi`].
//!
//! Each distinct query (operation plus arguments) is cached independently.
//! An entry is served as-is while fresh, refetched once stale, and dropped
//! after going unused for the eviction window. Errors are never cached.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::api::{AiSummary, Amendment, ApiError, Bill, BillsApi, ErrorDetail};

/// Freshness and eviction windows for cached results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long after fetching a result is served without refetching.
    pub stale_after: Duration,
    /// How long an entry may go unaccessed before it is dropped.
    pub evict_after: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(5 * 60),
            evict_after: Duration::from_secs(30 * 60),
        }
    }
}

struct Entry<V> {
    value: V,
    fetched_at: Instant,
    last_access: Instant,
}

/// Keyed cache with per-entry staleness and idle eviction.
pub struct QueryCache<K, V> {
    policy: CachePolicy,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V: Clone> QueryCache<K, V> {
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value if it is still fresh.
    ///
    /// Also drops idle entries and marks `key` as accessed, so a stale entry
    /// that keeps being asked for is not evicted while its refetch runs.
    pub fn get_fresh(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let evict_after = self.policy.evict_after;
        entries.retain(|_, entry| now.duration_since(entry.last_access) < evict_after);

        let entry = entries.get_mut(key)?;
        entry.last_access = now;
        (now.duration_since(entry.fetched_at) < self.policy.stale_after)
            .then(|| entry.value.clone())
    }

    /// Store a freshly fetched value.
    pub fn insert(&self, key: K, value: V) {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                Entry {
                    value,
                    fetched_at: now,
                    last_access: now,
                },
            );
    }

    /// Drop every entry, forcing the next lookups to refetch.
    pub fn invalidate_all(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key: operation name plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Bill {
        congress: u32,
        bill_type: String,
        number: u32,
    },
    Amendment {
        congress: u32,
        amendment_type: String,
        number: u32,
    },
    RecentSummaries {
        limit: usize,
    },
    ProcessingErrors,
}

impl QueryKey {
    // Type codes are case-insensitive upstream, so "hr" and "HR" share an entry.
    fn bill(congress: u32, bill_type: &str, number: u32) -> Self {
        Self::Bill {
            congress,
            bill_type: bill_type.to_ascii_uppercase(),
            number,
        }
    }

    fn amendment(congress: u32, amendment_type: &str, number: u32) -> Self {
        Self::Amendment {
            congress,
            amendment_type: amendment_type.to_ascii_uppercase(),
            number,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Bill(Bill),
    Amendment(Amendment),
    Summaries(Vec<AiSummary>),
    Errors(Vec<ErrorDetail>),
}

/// `BillsApi` decorator that caches results per query.
pub struct CachedSource {
    inner: Arc<dyn BillsApi>,
    cache: QueryCache<QueryKey, CachedValue>,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn BillsApi>, policy: CachePolicy) -> Self {
        Self {
            inner,
            cache: QueryCache::new(policy),
        }
    }

    /// Forget all cached results (the dashboard's manual refresh).
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl BillsApi for CachedSource {
    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        bill_number: u32,
    ) -> Result<Bill, ApiError> {
        let key = QueryKey::bill(congress, bill_type, bill_number);
        if let Some(CachedValue::Bill(bill)) = self.cache.get_fresh(&key) {
            tracing::trace!(?key, "cache hit");
            return Ok(bill);
        }

        let bill = self
            .inner
            .get_bill(congress, bill_type, bill_number)
            .await?;
        self.cache.insert(key, CachedValue::Bill(bill.clone()));
        Ok(bill)
    }

    async fn get_amendment(
        &self,
        congress: u32,
        amendment_type: &str,
        amendment_number: u32,
    ) -> Result<Amendment, ApiError> {
        let key = QueryKey::amendment(congress, amendment_type, amendment_number);
        if let Some(CachedValue::Amendment(amendment)) = self.cache.get_fresh(&key) {
            tracing::trace!(?key, "cache hit");
            return Ok(amendment);
        }

        let amendment = self
            .inner
            .get_amendment(congress, amendment_type, amendment_number)
            .await?;
        self.cache
            .insert(key, CachedValue::Amendment(amendment.clone()));
        Ok(amendment)
    }

    async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError> {
        let key = QueryKey::RecentSummaries { limit };
        if let Some(CachedValue::Summaries(summaries)) = self.cache.get_fresh(&key) {
            tracing::trace!(?key, "cache hit");
            return Ok(summaries);
        }

        let summaries = self.inner.get_recent_summaries(limit).await?;
        self.cache
            .insert(key, CachedValue::Summaries(summaries.clone()));
        Ok(summaries)
    }

    async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError> {
        let key = QueryKey::ProcessingErrors;
        if let Some(CachedValue::Errors(errors)) = self.cache.get_fresh(&key) {
            tracing::trace!(?key, "cache hit");
            return Ok(errors);
        }

        let errors = self.inner.get_processing_errors().await?;
        self.cache.insert(key, CachedValue::Errors(errors.clone()));
        Ok(errors)
    }
}
