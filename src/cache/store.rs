//! Cache Store Module
//!
//! Process-wide TTL cache shared by every fetch handler.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

// == TTL Cache ==
/// String-keyed cache with a per-entry TTL chosen by the caller.
///
/// Every operation takes the lock once and never awaits, so operations do not
/// interleave with each other. A read that meets an expired entry removes it
/// before reporting absence; the background sweep only bounds memory for keys
/// that are never read again.
#[derive(Debug)]
pub struct TtlCache<V> {
    inner: Mutex<Inner<V>>,
    destroyed: AtomicBool,
    sweeper: Mutex<Option<AbortHandle>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            destroyed: AtomicBool::new(false),
            sweeper: Mutex::new(None),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Last writer wins: any existing entry is replaced along with its expiry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl, Instant::now());
        let mut inner = self.inner.lock();
        inner.entries.insert(key.into(), entry);
    }

    // == Has ==
    /// Reports whether a live entry exists, removing it if it has expired.
    ///
    /// A presence check, not a read: hit and miss counters are left alone.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            None => return false,
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            inner.entries.remove(key);
        }
        !expired
    }

    // == Delete ==
    /// Removes an entry. Returns true if something was stored under `key`.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().entries.remove(key).is_some()
    }

    // == Clear ==
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Sweep Expired ==
    /// Removes every entry whose expiry has passed.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - inner.entries.len();

        inner.stats.record_swept(removed);
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Lifecycle ==
    /// Registers the background sweep task so `destroy` can stop it.
    ///
    /// A task attached after `destroy` is aborted immediately.
    pub fn attach_sweeper(&self, handle: AbortHandle) {
        if self.is_destroyed() {
            handle.abort();
            return;
        }
        if let Some(previous) = self.sweeper.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stops the background sweep and drops all entries.
    ///
    /// No sweep runs against this cache afterwards.
    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        if let Some(handle) = self.sweeper.lock().take() {
            handle.abort();
        }
        self.clear();
        debug!("cache destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl<V: Clone> TtlCache<V> {
    // == Get ==
    /// Returns a copy of the live value under `key`.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            None => {
                inner.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.record_expired_on_read();
            return None;
        }

        let value = inner.entries.get(key).map(|entry| entry.value.clone());
        inner.stats.record_hit();
        value
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[derive(Debug, Clone, PartialEq)]
    struct Page {
        content: String,
    }

    fn page(content: &str) -> Page {
        Page {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_cache_new() {
        let cache: TtlCache<String> = TtlCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(!cache.is_destroyed());
    }

    #[test]
    fn test_set_and_get() {
        let cache = TtlCache::new();
        cache.set("page:100:html", page("A"), Duration::from_secs(15));

        assert_eq!(cache.get("page:100:html"), Some(page("A")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let cache: TtlCache<Page> = TtlCache::new();
        assert_eq!(cache.get("nonexistent"), None);
        assert!(!cache.has("nonexistent"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache = TtlCache::new();
        cache.set("k", page("v1"), Duration::from_secs(15));
        cache.set("k", page("v2"), Duration::from_secs(15));

        assert_eq!(cache.get("k"), Some(page("v2")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::from_secs(60));

        assert!(cache.delete("k"));
        assert!(!cache.has("k"));
        assert!(!cache.delete("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::new();
        cache.set("a", 1, Duration::from_secs(60));
        cache.set("b", 2, Duration::from_secs(60));
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(!cache.has("a"));
        assert!(!cache.has("b"));
    }

    #[test]
    fn test_zero_ttl_reads_as_miss() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::ZERO);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_expires_after_ttl() {
        let cache = TtlCache::new();
        cache.set("page:100:html", page("A"), Duration::from_millis(15_000));

        assert_eq!(cache.get("page:100:html"), Some(page("A")));

        advance(Duration::from_millis(16_000)).await;

        assert_eq!(cache.get("page:100:html"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_until_exact_ttl() {
        let cache = TtlCache::new();
        cache.set("k", 7, Duration::from_millis(1_000));

        advance(Duration::from_millis(999)).await;
        assert_eq!(cache.get("k"), Some(7));

        advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_ttls() {
        let cache = TtlCache::new();
        cache.set("k1", "short", Duration::from_millis(100));
        cache.set("k2", "long", Duration::from_millis(100_000));

        advance(Duration::from_millis(500)).await;

        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k2"), Some("long"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_read_removes_entry() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::from_millis(10));
        advance(Duration::from_millis(20)).await;

        // Still occupying storage until something touches it
        assert_eq!(cache.len(), 1);
        assert!(!cache.has("k"));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_expiry() {
        let cache = TtlCache::new();
        cache.set("k", "old", Duration::from_millis(100));
        advance(Duration::from_millis(80)).await;
        cache.set("k", "new", Duration::from_millis(100));
        advance(Duration::from_millis(80)).await;

        assert_eq!(cache.get("k"), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_expired() {
        let cache = TtlCache::new();
        cache.set("k1", 1, Duration::from_secs(1));
        cache.set("k2", 2, Duration::from_secs(10));

        advance(Duration::from_millis(1_100)).await;

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k2"), Some(2));
        assert_eq!(cache.stats().swept, 1);
    }

    #[test]
    fn test_stats() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::from_secs(60));
        cache.get("k");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_has_leaves_read_counters_alone() {
        let cache = TtlCache::new();
        cache.set("live", 1, Duration::from_secs(60));
        cache.set("stale", 2, Duration::from_millis(10));
        advance(Duration::from_millis(20)).await;

        assert!(cache.has("live"));
        assert!(!cache.has("stale"));
        assert!(!cache.has("missing"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expired_on_read, 0);
        assert_eq!(stats.total_entries, 1);
    }

    /// A task that never finishes on its own; the receiver resolves once the
    /// task is dropped by an abort.
    fn pending_task() -> (AbortHandle, tokio::sync::oneshot::Receiver<()>) {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _tx = tx;
            std::future::pending::<()>().await;
        });
        (handle.abort_handle(), rx)
    }

    #[tokio::test]
    async fn test_destroy_clears_and_aborts_sweeper() {
        let cache: TtlCache<u8> = TtlCache::new();
        cache.set("k", 1, Duration::from_secs(60));

        let (handle, dropped) = pending_task();
        cache.attach_sweeper(handle);

        cache.destroy();

        assert!(cache.is_destroyed());
        assert!(cache.is_empty());
        assert!(dropped.await.is_err(), "sweeper should have been aborted");
    }

    #[tokio::test]
    async fn test_attach_after_destroy_aborts() {
        let cache: TtlCache<u8> = TtlCache::new();
        cache.destroy();

        let (handle, dropped) = pending_task();
        cache.attach_sweeper(handle);

        assert!(dropped.await.is_err());
    }
}
