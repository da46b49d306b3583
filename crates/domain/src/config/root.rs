use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::lookup::LookupConfig;
use super::resolver::{parse_server_addr, ResolverConfig};

/// Main configuration structure for rdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// PTR resolver (nameserver, timeout, TCP fallback)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Hostname cache sizing and expiry
    #[serde(default)]
    pub cache: CacheConfig,

    /// Lookup orchestration (negative caching, concurrency, shutdown)
    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rdns.toml in current directory
    /// 3. /etc/rdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("rdns.toml").exists() {
            Self::from_file("rdns.toml")?
        } else if std::path::Path::new("/etc/rdns/config.toml").exists() {
            Self::from_file("/etc/rdns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.resolver.server = Some(server);
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if overrides.no_cache {
            self.cache.enabled = false;
        }
        if let Some(threshold) = overrides.empty_response_threshold {
            self.lookup.empty_response_threshold = threshold;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        if let Some(server) = &self.resolver.server {
            parse_server_addr(server).map_err(ConfigError::Validation)?;
        }

        if self.cache.enabled {
            if self.cache.max_entries == 0 {
                return Err(ConfigError::Validation(
                    "Cache max_entries cannot be 0 while the cache is enabled".to_string(),
                ));
            }
            if self.cache.ttl_secs == 0 {
                return Err(ConfigError::Validation(
                    "Cache ttl_secs cannot be 0 while the cache is enabled".to_string(),
                ));
            }
        }

        if matches!(self.cache.concurrency, Some(0)) || matches!(self.lookup.concurrency, Some(0))
        {
            return Err(ConfigError::Validation(
                "Concurrency hints must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub timeout_ms: Option<u64>,
    pub no_cache: bool,
    pub empty_response_threshold: Option<i64>,
    pub log_level: Option<String>,
}
