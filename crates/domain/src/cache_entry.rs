use std::sync::Arc;

/// Outcome of a reverse lookup as held by a hostname cache.
///
/// Both variants count as a cache hit: the address needs no further network
/// query until the entry expires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheEntry {
    /// A resolved PTR target, without the trailing root label.
    Hostname(Arc<str>),

    /// Repeated live queries found no PTR record for the address.
    ConfirmedEmpty,
}

impl CacheEntry {
    pub fn hostname(name: impl Into<Arc<str>>) -> Self {
        CacheEntry::Hostname(name.into())
    }

    /// The cached hostname, or `None` for a confirmed-empty entry.
    pub fn host_name(&self) -> Option<&Arc<str>> {
        match self {
            CacheEntry::Hostname(name) => Some(name),
            CacheEntry::ConfirmedEmpty => None,
        }
    }

    pub fn is_confirmed_empty(&self) -> bool {
        matches!(self, CacheEntry::ConfirmedEmpty)
    }
}
