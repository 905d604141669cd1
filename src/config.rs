//! Configuration Module
//!
//! Cache construction parameters and the server configuration loaded from
//! environment variables.

use std::env;
use std::time::Duration;

/// Default interval between background TTL sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

// == Cache Config ==
/// Parameters fixed for the lifetime of a `Cache`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries, must be at least 1
    pub capacity: usize,
    /// Interval between reclaimer sweeps; zero disables the reclaimer
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a config with the given capacity and the default sweep interval.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Sets the sweep interval. `Duration::ZERO` turns the reclaimer off.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Disables the background reclaimer; TTL is then enforced lazily on `get`.
    pub fn without_sweep(self) -> Self {
        self.with_sweep_interval(Duration::ZERO)
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Cache capacity (default: 1000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Cache parameters derived from this server config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.max_entries)
            .with_sweep_interval(Duration::from_secs(self.sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            sweep_interval: DEFAULT_SWEEP_INTERVAL.as_secs(),
            server_port: 3000,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.sweep_interval, 10);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.sweep_interval, 10);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_cache_config_from_server_config() {
        let config = Config {
            max_entries: 5,
            sweep_interval: 0,
            server_port: 0,
        };

        let cache_config = config.cache_config();
        assert_eq!(cache_config.capacity, 5);
        assert!(cache_config.sweep_interval.is_zero());
    }

    #[test]
    fn test_cache_config_builders() {
        let config = CacheConfig::new(3);
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);

        let config = config.with_sweep_interval(Duration::from_millis(250));
        assert_eq!(config.sweep_interval, Duration::from_millis(250));

        assert!(config.without_sweep().sweep_interval.is_zero());
    }
}
