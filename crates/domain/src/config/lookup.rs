use crate::negative_caching::NegativeCachingPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Concurrency hint for internal tables; defaults to 16 per available core
    #[serde(default)]
    pub concurrency: Option<usize>,

    #[serde(default = "default_attempt_counter_capacity")]
    pub attempt_counter_capacity: usize,

    /// Consecutive empty responses before a confirmed-empty entry is cached.
    /// Any negative value disables negative caching.
    #[serde(default = "default_empty_response_threshold")]
    pub empty_response_threshold: i64,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl LookupConfig {
    pub fn negative_caching(&self) -> NegativeCachingPolicy {
        NegativeCachingPolicy::from_threshold(self.empty_response_threshold)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            attempt_counter_capacity: default_attempt_counter_capacity(),
            empty_response_threshold: default_empty_response_threshold(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

fn default_attempt_counter_capacity() -> usize {
    1000
}

fn default_empty_response_threshold() -> i64 {
    2
}

fn default_shutdown_grace_ms() -> u64 {
    1000
}
