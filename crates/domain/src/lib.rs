//! rdns Domain Layer
pub mod cache_entry;
pub mod config;
pub mod errors;
pub mod negative_caching;
pub mod reverse_name;

pub use cache_entry::CacheEntry;
pub use config::{
    CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, LookupConfig, ResolverConfig,
};
pub use errors::DomainError;
pub use negative_caching::NegativeCachingPolicy;
pub use reverse_name::{ipv4_reverse_name, ipv6_reverse_name, reverse_name};
