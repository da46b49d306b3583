use lru::LruCache;
use rdns_application::ports::HostnameCache;
use rdns_domain::{CacheEntry, CacheConfig, DomainError};
use rustc_hash::FxBuildHasher;
use std::hash::BuildHasher;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::warn;

struct TimedEntry {
    entry: CacheEntry,
    expires_at: Instant,
}

type Shard = Mutex<LruCache<IpAddr, TimedEntry, FxBuildHasher>>;

/// Bounded in-memory hostname cache with expire-after-write semantics.
///
/// The key space is split across independently locked LRU shards, one per
/// unit of expected concurrency (capped by capacity). Each shard holds
/// `max_entries / shards` entries, so the total never exceeds `max_entries`.
/// An entry expires `ttl` after it was written; reads do not extend it.
pub struct InMemoryCache {
    shards: Box<[Shard]>,
    hasher: FxBuildHasher,
    ttl: Duration,
    max_entries: usize,
}

impl InMemoryCache {
    pub fn new(max_entries: usize, ttl: Duration, concurrency: usize) -> Result<Self, DomainError> {
        if max_entries == 0 {
            return Err(DomainError::ConfigError(
                "Cache capacity must be at least 1".to_string(),
            ));
        }
        if concurrency == 0 {
            return Err(DomainError::ConfigError(
                "Cache concurrency must be at least 1".to_string(),
            ));
        }
        if ttl.is_zero() {
            return Err(DomainError::ConfigError(
                "Cache expiry must be greater than zero".to_string(),
            ));
        }
        if Instant::now().checked_add(ttl).is_none() {
            return Err(DomainError::ConfigError(format!(
                "Cache expiry of {}s is too large",
                ttl.as_secs()
            )));
        }

        let shard_count = concurrency.min(max_entries);
        let per_shard = NonZeroUsize::new(max_entries / shard_count).ok_or_else(|| {
            DomainError::ConfigError("Cache shard capacity must be at least 1".to_string())
        })?;

        let shards = (0..shard_count)
            .map(|_| Mutex::new(LruCache::with_hasher(per_shard, FxBuildHasher)))
            .collect();

        Ok(Self {
            shards,
            hasher: FxBuildHasher,
            ttl,
            max_entries,
        })
    }

    pub fn from_config(config: &CacheConfig, default_concurrency: usize) -> Result<Self, DomainError> {
        Self::new(
            config.max_entries,
            Duration::from_secs(config.ttl_secs),
            config.concurrency.unwrap_or(default_concurrency),
        )
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        for shard in self.shards.iter() {
            let mut shard = lock(shard);
            let expired: Vec<IpAddr> = shard
                .iter()
                .filter(|(_, timed)| now >= timed.expires_at)
                .map(|(ip, _)| *ip)
                .collect();
            for ip in &expired {
                shard.pop(ip);
            }
            removed += expired.len();
        }
        removed
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            lock(shard).clear();
        }
    }

    fn shard_for(&self, ip: &IpAddr) -> &Shard {
        let index = self.hasher.hash_one(ip) as usize % self.shards.len();
        &self.shards[index]
    }
}

impl HostnameCache for InMemoryCache {
    fn get(&self, ip: &IpAddr) -> Option<CacheEntry> {
        let mut shard = lock(self.shard_for(ip));
        let now = Instant::now();

        if let Some(timed) = shard.get(ip) {
            if now < timed.expires_at {
                return Some(timed.entry.clone());
            }
            shard.pop(ip);
        }

        None
    }

    fn put(&self, ip: IpAddr, entry: CacheEntry) {
        let Some(expires_at) = Instant::now().checked_add(self.ttl) else {
            warn!(ip = %ip, ttl_secs = self.ttl.as_secs(), "Cache expiry overflows, entry not stored");
            return;
        };
        lock(self.shard_for(&ip)).put(ip, TimedEntry { entry, expires_at });
    }
}

// A panic while holding a shard lock cannot leave an LRU half-updated in a
// way that matters here, so a poisoned shard stays usable.
fn lock(shard: &Shard) -> MutexGuard<'_, LruCache<IpAddr, TimedEntry, FxBuildHasher>> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}
