use serde::{Deserialize, Serialize};

/// When an address with no PTR record gets a confirmed-empty cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeCachingPolicy {
    /// Empty responses are never cached; every lookup re-queries.
    Disabled,

    /// Cache a confirmed-empty entry once this many consecutive empty
    /// responses were seen. Zero behaves like one.
    AfterAttempts(u32),
}

impl NegativeCachingPolicy {
    /// Maps a configured threshold onto a policy. Negative values disable
    /// negative caching.
    pub fn from_threshold(threshold: i64) -> Self {
        if threshold < 0 {
            NegativeCachingPolicy::Disabled
        } else {
            NegativeCachingPolicy::AfterAttempts(threshold.min(u32::MAX as i64) as u32)
        }
    }

    pub fn threshold(&self) -> Option<u32> {
        match self {
            NegativeCachingPolicy::Disabled => None,
            NegativeCachingPolicy::AfterAttempts(n) => Some(*n),
        }
    }
}

impl Default for NegativeCachingPolicy {
    fn default() -> Self {
        NegativeCachingPolicy::AfterAttempts(2)
    }
}
