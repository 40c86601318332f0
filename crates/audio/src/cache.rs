//! Synthesis cache
//!
//! Short-lived byte cache in front of the synthesis gateway. Personalized
//! lines and fallback replies repeat within a call and across near-simultaneous
//! calls, so even a small cache removes most upstream round-trips.
//!
//! Bounds:
//! - entries expire after the configured TTL; expired entries are misses and
//!   are purged lazily
//! - above capacity, exactly the single oldest entry is evicted
//!
//! Keys are normalized (trimmed, lowercased) so recognizer casing noise does
//! not split entries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use dialogo_core::normalize;
use parking_lot::Mutex;
use tracing::debug;

use crate::gateway::TtsGateway;
use crate::AudioError;

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub evictions: AtomicU64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

struct CacheEntry {
    bytes: Bytes,
    created: Instant,
    /// Insertion order; the entry with the lowest sequence is the oldest.
    seq: u64,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    next_seq: u64,
}

/// TTL and capacity bounded text-to-bytes cache.
pub struct SynthesisCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    capacity: usize,
    pub stats: CacheStats,
}

impl SynthesisCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity),
                next_seq: 0,
            }),
            ttl,
            capacity,
            stats: CacheStats::default(),
        }
    }

    pub fn get(&self, text: &str) -> Option<Bytes> {
        let key = normalize(text);
        let mut inner = self.inner.lock();
        match inner.entries.get(&key) {
            Some(entry) if entry.created.elapsed() < self.ttl => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.bytes.clone())
            }
            Some(_) => {
                inner.entries.remove(&key);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, text: &str, bytes: Bytes) {
        let key = normalize(text);
        let mut inner = self.inner.lock();

        let ttl = self.ttl;
        inner.entries.retain(|_, entry| entry.created.elapsed() < ttl);

        // Replacing an existing key never needs an eviction.
        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(k, _)| k.clone())
            {
                inner.entries.remove(&oldest);
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(key = %oldest, "evicted oldest cache entry");
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key,
            CacheEntry {
                bytes,
                created: Instant::now(),
                seq,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Gateway wrapper that serves repeats from the cache.
pub struct CachedSynthesizer {
    gateway: Arc<dyn TtsGateway>,
    cache: SynthesisCache,
}

impl CachedSynthesizer {
    pub fn new(gateway: Arc<dyn TtsGateway>, ttl: Duration, capacity: usize) -> Self {
        Self {
            gateway,
            cache: SynthesisCache::new(ttl, capacity),
        }
    }

    /// Synthesize through the cache.
    pub async fn fetch(&self, text: &str) -> Result<Bytes, AudioError> {
        if let Some(bytes) = self.cache.get(text) {
            return Ok(bytes);
        }
        let bytes = self.gateway.synthesize(text).await?;
        self.cache.insert(text, bytes.clone());
        Ok(bytes)
    }

    /// Synthesize bypassing the cache, for one-off previews.
    pub async fn fetch_uncached(&self, text: &str) -> Result<Bytes, AudioError> {
        self.gateway.synthesize(text).await
    }

    pub fn stats(&self) -> &CacheStats {
        &self.cache.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct CountingGateway {
        calls: AtomicUsize,
    }

    impl CountingGateway {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TtsGateway for CountingGateway {
        async fn synthesize(&self, text: &str) -> Result<Bytes, AudioError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from(format!("audio:{text}:{n}")))
        }
    }

    #[tokio::test]
    async fn repeat_fetch_hits_the_cache() {
        let gateway = CountingGateway::new();
        let synth = CachedSynthesizer::new(gateway.clone(), Duration::from_secs(300), 50);

        let first = synth.fetch("Hola, Juan").await.unwrap();
        let second = synth.fetch("  hola, juan  ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert_eq!(synth.stats().hits.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn uncached_fetch_always_goes_upstream() {
        let gateway = CountingGateway::new();
        let synth = CachedSynthesizer::new(gateway.clone(), Duration::from_secs(300), 50);

        synth.fetch_uncached("hola").await.unwrap();
        synth.fetch_uncached("hola").await.unwrap();
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn overflow_evicts_exactly_the_single_oldest() {
        let cache = SynthesisCache::new(Duration::from_secs(300), 3);
        cache.insert("uno", Bytes::from_static(b"1"));
        cache.insert("dos", Bytes::from_static(b"2"));
        cache.insert("tres", Bytes::from_static(b"3"));
        cache.insert("cuatro", Bytes::from_static(b"4"));

        assert_eq!(cache.len(), 3);
        assert!(cache.get("uno").is_none());
        assert!(cache.get("dos").is_some());
        assert!(cache.get("tres").is_some());
        assert!(cache.get("cuatro").is_some());
        assert_eq!(cache.stats.evictions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn replacing_a_key_does_not_evict() {
        let cache = SynthesisCache::new(Duration::from_secs(300), 2);
        cache.insert("uno", Bytes::from_static(b"1"));
        cache.insert("dos", Bytes::from_static(b"2"));
        cache.insert("uno", Bytes::from_static(b"1b"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("dos").unwrap(), Bytes::from_static(b"2"));
        assert_eq!(cache.get("uno").unwrap(), Bytes::from_static(b"1b"));
        assert_eq!(cache.stats.evictions.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn expired_entries_are_misses() {
        let cache = SynthesisCache::new(Duration::from_millis(10), 50);
        cache.insert("hola", Bytes::from_static(b"a"));
        std::thread::sleep(Duration::from_millis(25));

        assert!(cache.get("hola").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn expired_entries_free_capacity_before_eviction() {
        let cache = SynthesisCache::new(Duration::from_millis(10), 2);
        cache.insert("uno", Bytes::from_static(b"1"));
        std::thread::sleep(Duration::from_millis(25));
        cache.insert("dos", Bytes::from_static(b"2"));
        cache.insert("tres", Bytes::from_static(b"3"));

        // The stale entry was purged, so no live entry needed evicting.
        assert_eq!(cache.stats.evictions.load(Ordering::Relaxed), 0);
        assert!(cache.get("dos").is_some());
        assert!(cache.get("tres").is_some());
    }
}
