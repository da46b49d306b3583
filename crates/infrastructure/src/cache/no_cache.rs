use rdns_application::ports::HostnameCache;
use rdns_domain::CacheEntry;
use std::net::IpAddr;

/// Cache strategy used when caching is turned off: nothing is ever stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl HostnameCache for NoCache {
    fn get(&self, _ip: &IpAddr) -> Option<CacheEntry> {
        None
    }

    fn put(&self, _ip: IpAddr, _entry: CacheEntry) {}
}
