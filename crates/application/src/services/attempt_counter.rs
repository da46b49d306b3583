use crate::ports::HostnameCache;
use dashmap::DashMap;
use rdns_domain::CacheEntry;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;

/// Result of recording one empty PTR response for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Below the threshold; holds the consecutive empty count so far.
    Pending(u32),

    /// Threshold reached: the counter was dropped and a confirmed-empty entry
    /// written to the cache.
    Confirmed,

    /// The cache already holds an entry for the address, nothing counted.
    AlreadyCached,
}

/// Consecutive empty-response counts per address, gating negative caching.
///
/// Every update runs under the shard lock of its key, so concurrent empty
/// responses for one address can neither double count nor cross the
/// threshold twice.
pub struct AttemptCounter {
    counts: DashMap<IpAddr, u32, FxBuildHasher>,
}

impl AttemptCounter {
    pub fn new(initial_capacity: usize, concurrency: usize) -> Self {
        // dashmap requires a power of two greater than one
        let shard_amount = concurrency.max(2).next_power_of_two();
        Self {
            counts: DashMap::with_capacity_and_hasher_and_shard_amount(
                initial_capacity,
                FxBuildHasher,
                shard_amount,
            ),
        }
    }

    /// Counts an empty response for `ip` and writes the confirmed-empty entry
    /// to `cache` once `threshold` consecutive empties were seen.
    ///
    /// The threshold decision uses the value produced by this very update.
    pub fn record_empty(
        &self,
        ip: IpAddr,
        threshold: u32,
        cache: &dyn HostnameCache,
    ) -> AttemptOutcome {
        match self.counts.entry(ip) {
            dashmap::Entry::Occupied(mut e) => {
                let count = e.get().saturating_add(1);
                if count >= threshold {
                    cache.put(ip, CacheEntry::ConfirmedEmpty);
                    e.remove();
                    AttemptOutcome::Confirmed
                } else {
                    *e.get_mut() = count;
                    AttemptOutcome::Pending(count)
                }
            }
            dashmap::Entry::Vacant(v) => {
                // A concurrent lookup already settled this address.
                if cache.get(&ip).is_some() {
                    return AttemptOutcome::AlreadyCached;
                }
                if threshold <= 1 {
                    cache.put(ip, CacheEntry::ConfirmedEmpty);
                    AttemptOutcome::Confirmed
                } else {
                    v.insert(1);
                    AttemptOutcome::Pending(1)
                }
            }
        }
    }

    /// Forgets any progress for `ip` after a positive answer.
    pub fn reset(&self, ip: &IpAddr) {
        self.counts.remove(ip);
    }

    pub fn get(&self, ip: &IpAddr) -> Option<u32> {
        self.counts.get(ip).map(|count| *count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
