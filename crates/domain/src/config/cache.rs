use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Seconds an entry stays valid after it was written
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Expected number of concurrently updating tasks; sizes the shard count
    #[serde(default)]
    pub concurrency: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
            concurrency: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    1024 * 1024
}

fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}
