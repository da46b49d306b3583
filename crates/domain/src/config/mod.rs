pub mod cache;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use lookup::LookupConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
