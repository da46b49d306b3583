#![allow(dead_code)]

use async_trait::async_trait;
use rdns_application::ports::{HostnameCache, PtrResolver};
use rdns_domain::{reverse_name, CacheEntry, DomainError};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Scripted PTR resolver. Unknown names answer with no records.
pub struct MockPtrResolver {
    responses: Arc<RwLock<HashMap<String, Result<Vec<String>, DomainError>>>>,
    queried: Arc<RwLock<Vec<String>>>,
    call_count: Arc<AtomicU64>,
    delay: Option<Duration>,
}

impl MockPtrResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            queried: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_records(&self, ip: &str, records: &[&str]) {
        let records = records.iter().map(|r| r.to_string()).collect();
        self.responses
            .write()
            .await
            .insert(reverse_name(&ip.parse().unwrap()), Ok(records));
    }

    pub async fn set_failure(&self, ip: &str, error: DomainError) {
        self.responses
            .write()
            .await
            .insert(reverse_name(&ip.parse().unwrap()), Err(error));
    }

    pub async fn clear(&self, ip: &str) {
        self.responses
            .write()
            .await
            .remove(&reverse_name(&ip.parse().unwrap()));
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub async fn queried_names(&self) -> Vec<String> {
        self.queried.read().await.clone()
    }
}

#[async_trait]
impl PtrResolver for MockPtrResolver {
    async fn query_ptr(&self, reverse_domain: &str) -> Result<Vec<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.queried.write().await.push(reverse_domain.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.responses.read().await.get(reverse_domain) {
            Some(response) => response.clone(),
            None => Ok(vec![]),
        }
    }
}

/// Unbounded cache that records every write.
pub struct MockHostnameCache {
    entries: Mutex<HashMap<IpAddr, CacheEntry>>,
    put_count: AtomicU64,
    confirmed_empty_puts: AtomicU64,
}

impl MockHostnameCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            put_count: AtomicU64::new(0),
            confirmed_empty_puts: AtomicU64::new(0),
        }
    }

    /// Simulates expiry or eviction of an entry.
    pub fn remove(&self, ip: &IpAddr) {
        self.entries.lock().unwrap().remove(ip);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn put_count(&self) -> u64 {
        self.put_count.load(Ordering::SeqCst)
    }

    pub fn confirmed_empty_puts(&self) -> u64 {
        self.confirmed_empty_puts.load(Ordering::SeqCst)
    }
}

impl HostnameCache for MockHostnameCache {
    fn get(&self, ip: &IpAddr) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(ip).cloned()
    }

    fn put(&self, ip: IpAddr, entry: CacheEntry) {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        if entry.is_confirmed_empty() {
            self.confirmed_empty_puts.fetch_add(1, Ordering::SeqCst);
        }
        self.entries.lock().unwrap().insert(ip, entry);
    }
}
