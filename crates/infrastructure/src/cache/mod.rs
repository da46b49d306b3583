mod in_memory;
mod no_cache;

pub use in_memory::InMemoryCache;
pub use no_cache::NoCache;
