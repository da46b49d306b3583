use super::attempt_counter::{AttemptCounter, AttemptOutcome};
use super::lookup_handle::LookupHandle;
use crate::ports::{HostnameCache, HostnameResolver, PtrResolver};
use async_trait::async_trait;
use rdns_domain::{reverse_name, CacheEntry, DomainError, NegativeCachingPolicy};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

const DEFAULT_ATTEMPT_COUNTER_CAPACITY: usize = 1000;

/// Sixteen tasks per available core, the sizing hint used when none is given.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 16
}

/// Cache-backed asynchronous reverse DNS lookups.
///
/// Every lookup runs as a task on the configured runtime. Cached outcomes are
/// answered without a query; misses go to the [`PtrResolver`]. Addresses that
/// keep answering without a PTR record are cached as confirmed-empty once the
/// [`NegativeCachingPolicy`] threshold is reached.
pub struct ReverseLookupService {
    worker: Arc<LookupWorker>,
    runtime: Handle,
    tracker: TaskTracker,
    accepting: CancellationToken,
    terminate: CancellationToken,
}

struct LookupWorker {
    cache: Arc<dyn HostnameCache>,
    resolver: Arc<dyn PtrResolver>,
    attempts: AttemptCounter,
    negative_caching: NegativeCachingPolicy,
}

impl ReverseLookupService {
    pub fn builder(
        resolver: Arc<dyn PtrResolver>,
        cache: Arc<dyn HostnameCache>,
    ) -> ReverseLookupBuilder {
        ReverseLookupBuilder {
            resolver,
            cache,
            runtime: None,
            concurrency: default_concurrency(),
            attempt_counter_capacity: DEFAULT_ATTEMPT_COUNTER_CAPACITY,
            negative_caching: NegativeCachingPolicy::default(),
        }
    }

    /// Starts a reverse lookup for `ip`.
    ///
    /// Never blocks: the cache is consulted here, everything else happens on
    /// the runtime. After [`shutdown`](Self::shutdown) began, the returned
    /// handle resolves to `None` without doing any work.
    pub fn lookup(&self, ip: IpAddr) -> LookupHandle {
        if self.accepting.is_cancelled() {
            warn!(ip = %ip, "Lookup rejected, service is shutting down");
            return LookupHandle::rejected();
        }

        let cached = self.worker.cache.get(&ip);
        let worker = Arc::clone(&self.worker);
        let terminate = self.terminate.clone();

        let task = self.tracker.spawn_on(
            async move {
                let lookup = async {
                    match cached {
                        Some(entry) => {
                            debug!(ip = %ip, confirmed_empty = entry.is_confirmed_empty(), "Cache hit");
                            entry.host_name().cloned()
                        }
                        None => worker.resolve(ip).await,
                    }
                };

                tokio::select! {
                    biased;
                    _ = terminate.cancelled() => {
                        debug!(ip = %ip, "Lookup terminated by shutdown");
                        None
                    }
                    hostname = lookup => hostname,
                }
            },
            &self.runtime,
        );

        LookupHandle::spawned(task)
    }

    pub fn cache(&self) -> &Arc<dyn HostnameCache> {
        &self.worker.cache
    }

    pub fn negative_caching(&self) -> NegativeCachingPolicy {
        self.worker.negative_caching
    }

    /// Consecutive empty responses recorded for `ip` that did not yet lead to
    /// a confirmed-empty entry.
    pub fn pending_attempts(&self, ip: &IpAddr) -> Option<u32> {
        self.worker.attempts.get(ip)
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.accepting.is_cancelled()
    }

    /// Stops accepting lookups and waits up to `grace` for in-flight ones.
    ///
    /// Lookups still running after the grace period are terminated and their
    /// handles resolve to `None`.
    #[instrument(skip(self))]
    pub async fn shutdown(&self, grace: Duration) {
        self.accepting.cancel();
        self.tracker.close();

        info!(in_flight = self.tracker.len(), "Shutting down reverse lookup service");

        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            warn!(
                remaining = self.tracker.len(),
                "Grace period elapsed, terminating in-flight lookups"
            );
            self.terminate.cancel();
            self.tracker.wait().await;
        }

        info!("Reverse lookup service stopped");
    }
}

impl LookupWorker {
    async fn resolve(&self, ip: IpAddr) -> Option<Arc<str>> {
        let reverse_domain = reverse_name(&ip);

        debug!(
            ip = %ip,
            reverse_domain = %reverse_domain,
            "Performing PTR lookup"
        );

        match self.resolver.query_ptr(&reverse_domain).await {
            Ok(records) => {
                let first = records.first().map(|record| strip_root_label(record));
                match first {
                    Some(hostname) if !hostname.is_empty() => {
                        let hostname: Arc<str> = Arc::from(hostname);
                        // Cleared first so no reader sees the hostname beside stale progress.
                        self.attempts.reset(&ip);
                        self.cache.put(ip, CacheEntry::Hostname(Arc::clone(&hostname)));
                        debug!(ip = %ip, hostname = %hostname, "PTR lookup successful");
                        return Some(hostname);
                    }
                    _ => debug!(ip = %ip, "PTR lookup returned no records"),
                }
            }
            Err(e) => {
                debug!(
                    ip = %ip,
                    error = %e,
                    reverse_domain = %reverse_domain,
                    "PTR lookup failed"
                );
            }
        }

        self.record_empty_response(ip);
        None
    }

    fn record_empty_response(&self, ip: IpAddr) {
        let Some(threshold) = self.negative_caching.threshold() else {
            return;
        };

        match self.attempts.record_empty(ip, threshold, self.cache.as_ref()) {
            AttemptOutcome::Confirmed => {
                debug!(ip = %ip, threshold, "No PTR record confirmed, caching empty result");
            }
            AttemptOutcome::Pending(attempts) => {
                debug!(ip = %ip, attempts, threshold, "Empty PTR response recorded");
            }
            AttemptOutcome::AlreadyCached => {}
        }
    }
}

/// Drops the root label terminator of a fully qualified name, if present.
fn strip_root_label(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

#[async_trait]
impl HostnameResolver for ReverseLookupService {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        if self.is_shut_down() {
            return Err(DomainError::ShutDown);
        }
        Ok(self.lookup(ip).await.map(|hostname| hostname.to_string()))
    }
}

pub struct ReverseLookupBuilder {
    resolver: Arc<dyn PtrResolver>,
    cache: Arc<dyn HostnameCache>,
    runtime: Option<Handle>,
    concurrency: usize,
    attempt_counter_capacity: usize,
    negative_caching: NegativeCachingPolicy,
}

impl ReverseLookupBuilder {
    /// Runtime the lookup tasks are spawned on. Defaults to the runtime
    /// `build` is called from.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_attempt_counter_capacity(mut self, capacity: usize) -> Self {
        self.attempt_counter_capacity = capacity;
        self
    }

    pub fn with_negative_caching(mut self, policy: NegativeCachingPolicy) -> Self {
        self.negative_caching = policy;
        self
    }

    pub fn build(self) -> Result<ReverseLookupService, DomainError> {
        if self.concurrency == 0 {
            return Err(DomainError::ConfigError(
                "Lookup concurrency must be at least 1".to_string(),
            ));
        }

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| {
                DomainError::ConfigError(format!("No tokio runtime to run lookups on: {}", e))
            })?,
        };

        Ok(ReverseLookupService {
            worker: Arc::new(LookupWorker {
                cache: self.cache,
                resolver: self.resolver,
                attempts: AttemptCounter::new(self.attempt_counter_capacity, self.concurrency),
                negative_caching: self.negative_caching,
            }),
            runtime,
            tracker: TaskTracker::new(),
            accepting: CancellationToken::new(),
            terminate: CancellationToken::new(),
        })
    }
}
