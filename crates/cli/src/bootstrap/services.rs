use anyhow::Context;
use rdns_application::ports::HostnameCache;
use rdns_application::{default_concurrency, ReverseLookupService};
use rdns_domain::Config;
use rdns_infrastructure::cache::{InMemoryCache, NoCache};
use rdns_infrastructure::dns::HickoryPtrResolver;
use std::sync::Arc;
use tracing::info;

/// Wires the resolver and cache chosen by `config` into a lookup service
/// running on the current runtime.
pub fn build_lookup_service(config: &Config) -> anyhow::Result<ReverseLookupService> {
    let concurrency = config.lookup.concurrency.unwrap_or_else(default_concurrency);

    let resolver = HickoryPtrResolver::from_config(&config.resolver)
        .context("Failed to create PTR resolver")?;

    info!(
        server = %resolver.server(),
        timeout_ms = config.resolver.timeout_ms,
        tcp_fallback = config.resolver.tcp_fallback,
        "PTR resolver ready"
    );

    let cache: Arc<dyn HostnameCache> = if config.cache.enabled {
        let cache = InMemoryCache::from_config(&config.cache, concurrency)
            .context("Failed to create hostname cache")?;
        info!(
            max_entries = cache.max_entries(),
            ttl_secs = cache.ttl().as_secs(),
            shards = cache.shard_count(),
            "Hostname cache enabled"
        );
        Arc::new(cache)
    } else {
        info!("Hostname cache disabled");
        Arc::new(NoCache)
    };

    let service = ReverseLookupService::builder(Arc::new(resolver), cache)
        .with_concurrency(concurrency)
        .with_attempt_counter_capacity(config.lookup.attempt_counter_capacity)
        .with_negative_caching(config.lookup.negative_caching())
        .build()
        .context("Failed to create reverse lookup service")?;

    Ok(service)
}
