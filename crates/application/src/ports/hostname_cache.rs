use rdns_domain::CacheEntry;
use std::net::IpAddr;

/// Storage for reverse lookup outcomes keyed by address.
///
/// Implementations own their eviction and expiry policy. `get` must never
/// touch the network; `put` overwrites any previous entry for the address.
pub trait HostnameCache: Send + Sync {
    fn get(&self, ip: &IpAddr) -> Option<CacheEntry>;

    fn put(&self, ip: IpAddr, entry: CacheEntry);
}
