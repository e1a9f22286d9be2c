//! Embedding cache.
//!
//! Caches computed embeddings so repeated texts (duplicate chunks, a
//! re-asked query) do not hit the embedding service again.
//!
//! Cache keys are SHA-256 hashes of `text | model_name`, so the same text
//! embedded under different models gets distinct entries. Eviction is
//! least-recently-used, bounded by an approximate byte budget.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Statistics for cache performance monitoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current size in bytes (approximate).
    pub size_bytes: u64,
    /// Number of entries in cache.
    pub entry_count: usize,
    /// Number of evictions due to capacity.
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Configuration for the embedding cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache size in bytes (default: 64MB).
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    /// Whether the cache is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_max_size_bytes() -> u64 {
    64 * 1024 * 1024 // 64 MB
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
            enabled: default_enabled(),
        }
    }
}

/// A cache entry with access metadata for LRU eviction.
#[derive(Debug, Clone)]
struct CacheEntry {
    embedding: Vec<f32>,
    last_accessed: Instant,
    size_bytes: usize,
}

impl CacheEntry {
    fn new(embedding: Vec<f32>) -> Self {
        let size_bytes = embedding.len() * std::mem::size_of::<f32>();
        Self {
            embedding,
            last_accessed: Instant::now(),
            size_bytes,
        }
    }
}

/// In-memory LRU cache for embeddings.
///
/// Thread-safe via `parking_lot::RwLock`; tracks approximate memory usage
/// and evicts least-recently-used entries once `max_size_bytes` is
/// exceeded.
pub struct LruEmbeddingCache {
    cache: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
    current_size: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl LruEmbeddingCache {
    /// Create a new LRU embedding cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            config,
            current_size: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Create a cache with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Compute the cache key for the given text and embedding model.
    pub fn compute_key(&self, text: &str, model: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(b"|");
        hasher.update(model.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get an embedding from the cache, refreshing its LRU position.
    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        if !self.config.enabled {
            return None;
        }

        let mut cache = self.cache.write();
        if let Some(entry) = cache.get_mut(key) {
            entry.last_accessed = Instant::now();
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(entry.embedding.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Store an embedding in the cache, evicting LRU entries if needed.
    pub fn set(&self, key: &str, embedding: Vec<f32>) {
        if !self.config.enabled {
            return;
        }

        let entry = CacheEntry::new(embedding);
        let entry_size = entry.size_bytes;

        if self.current_size.load(Ordering::Relaxed) + entry_size as u64
            > self.config.max_size_bytes
        {
            self.evict_lru(entry_size);
        }

        let mut cache = self.cache.write();
        if let Some(old_entry) = cache.remove(key) {
            self.current_size
                .fetch_sub(old_entry.size_bytes as u64, Ordering::Relaxed);
        }
        self.current_size
            .fetch_add(entry_size as u64, Ordering::Relaxed);
        cache.insert(key.to_string(), entry);
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size_bytes: self.current_size.load(Ordering::Relaxed),
            entry_count: self.cache.read().len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Evict least recently used entries until the new entry fits.
    fn evict_lru(&self, needed_bytes: usize) {
        let mut cache = self.cache.write();
        let target_size = self
            .config
            .max_size_bytes
            .saturating_sub(needed_bytes as u64);

        while self.current_size.load(Ordering::Relaxed) > target_size && !cache.is_empty() {
            let lru_key = cache
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());

            if let Some(key) = lru_key {
                if let Some(entry) = cache.remove(&key) {
                    self.current_size
                        .fetch_sub(entry.size_bytes as u64, Ordering::Relaxed);
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                }
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_computation() {
        let cache = LruEmbeddingCache::with_defaults();

        let key1 = cache.compute_key("hello world", "nomic-embed-text");
        let key2 = cache.compute_key("hello world", "nomic-embed-text");
        let key3 = cache.compute_key("hello world", "mxbai-embed-large");
        let key4 = cache.compute_key("different text", "nomic-embed-text");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_ne!(key1, key4);
    }

    #[test]
    fn test_set_and_get() {
        let cache = LruEmbeddingCache::with_defaults();
        let embedding = vec![1.0, 2.0, 3.0, 4.0];

        assert!(cache.get("k").is_none());
        assert_eq!(cache.stats().misses, 1);

        cache.set("k", embedding.clone());
        assert_eq!(cache.get("k"), Some(embedding));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_lru_eviction() {
        // 32-byte budget: holds exactly two 4-float embeddings
        let cache = LruEmbeddingCache::new(CacheConfig {
            max_size_bytes: 32,
            enabled: true,
        });

        cache.set("k1", vec![1.0, 2.0, 3.0, 4.0]);
        cache.set("k2", vec![5.0, 6.0, 7.0, 8.0]);
        assert!(cache.get("k1").is_some());
        assert!(cache.get("k2").is_some());

        // k1 was touched before k2 above, but get() refreshes both; touch
        // k2 again so k1 is the LRU entry.
        let _ = cache.get("k2");
        cache.set("k3", vec![9.0, 10.0, 11.0, 12.0]);

        assert!(cache.get("k1").is_none());
        assert!(cache.get("k2").is_some());
        assert!(cache.get("k3").is_some());
        assert!(cache.stats().evictions > 0);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = LruEmbeddingCache::new(CacheConfig {
            enabled: false,
            ..Default::default()
        });

        cache.set("k", vec![1.0, 2.0]);
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_update_existing_entry() {
        let cache = LruEmbeddingCache::with_defaults();

        cache.set("k", vec![1.0, 2.0]);
        let size1 = cache.stats().size_bytes;

        cache.set("k", vec![3.0, 4.0, 5.0, 6.0]);
        let size2 = cache.stats().size_bytes;

        assert!(size2 > size1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), Some(vec![3.0, 4.0, 5.0, 6.0]));
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 75,
            misses: 25,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 75.0).abs() < 0.001);
    }
}
