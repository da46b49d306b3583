mod hostname_cache;
mod hostname_resolver;
mod ptr_resolver;

pub use hostname_cache::HostnameCache;
pub use hostname_resolver::HostnameResolver;
pub use ptr_resolver::PtrResolver;

// Re-export for convenience
pub use rdns_domain::CacheEntry;
