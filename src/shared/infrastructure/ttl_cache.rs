use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cached entry with TTL support
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(data: V) -> Self {
        Self {
            data,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
    pub expired_cleanups: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Process-wide keyed cache with a single TTL
///
/// Values should be cheap to clone (an `Arc` around the payload).
#[derive(Debug)]
pub struct TtlCache<V> {
    cache: DashMap<String, CacheEntry<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    cleanups: AtomicU64,
    ttl: Duration,
    max_entries: usize,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            cleanups: AtomicU64::new(0),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a live entry, removing it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = match self.cache.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache hit for key: {} (age {:.1}s)",
                    key,
                    entry.created_at.elapsed().as_secs_f64()
                );
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.cache.remove(key);
            debug!("Removed expired cache entry for key: {}", key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);
        None
    }

    pub fn insert(&self, key: String, value: V) {
        if self.cache.len() >= self.max_entries {
            self.evict_oldest_entries();
        }

        debug!("Cached entry for key: {} with TTL: {:?}", key, self.ttl);
        self.cache.insert(key, CacheEntry::new(value));
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let before = self.cache.len();
        self.cache.retain(|_, entry| !entry.is_expired(ttl));
        let removed = before.saturating_sub(self.cache.len());

        if removed > 0 {
            self.cleanups.fetch_add(removed as u64, Ordering::Relaxed);
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.cache.len(),
            expired_cleanups: self.cleanups.load(Ordering::Relaxed),
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.cleanups.store(0, Ordering::Relaxed);
        info!("Cache cleared");
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Evict oldest entries back down to 90% of capacity
    fn evict_oldest_entries(&self) {
        let current_size = self.cache.len();

        let mut entries: Vec<(String, Instant)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().created_at))
            .collect();
        entries.sort_by_key(|(_, created_at)| *created_at);

        let target_size = (self.max_entries * 9) / 10;
        let entries_to_evict = current_size.saturating_sub(target_size).max(1);

        for (key, _) in entries.into_iter().take(entries_to_evict) {
            self.cache.remove(&key);
        }

        debug!(
            "Evicted {} old cache entries (was {}, now {})",
            entries_to_evict,
            current_size,
            self.cache.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_hit_and_miss_counters() {
        let cache: TtlCache<Arc<Vec<u32>>> = TtlCache::new(Duration::from_secs(60), 10);

        assert!(cache.get("k").is_none());
        cache.insert("k".to_string(), Arc::new(vec![1, 2]));
        assert_eq!(cache.get("k").as_deref(), Some(&vec![1, 2]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries_count, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::ZERO, 10);

        cache.insert("k".to_string(), 7);
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::ZERO, 10);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.stats().expired_cleanups, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_keeps_cache_bounded() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60), 10);
        for i in 0..25 {
            cache.insert(format!("k{}", i), i);
        }
        assert!(cache.len() <= 10);
        // Newest entry always survives
        assert_eq!(cache.get("k24"), Some(24));
    }

    #[test]
    fn test_clear_resets_everything() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60), 10);
        cache.insert("a".to_string(), 1);
        cache.get("a");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
