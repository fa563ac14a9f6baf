//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_ORDER_LIST_TTL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection URL
    pub database_url: String,
    /// Connection pool size
    pub db_max_connections: u32,
    /// Base URL of a remote cache server; `None` selects the in-process cache
    pub cache_url: Option<String>,
    /// Order list snapshot lifetime in seconds
    pub order_list_ttl: u64,
    /// Capacity of the in-process cache
    pub max_cache_entries: usize,
    /// In-process cache purge interval in seconds
    pub cleanup_interval: u64,
    /// Endpoint of the notification service
    pub notification_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DATABASE_URL` - SQLite URL (default: sqlite://orders.db?mode=rwc)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `CACHE_URL` - Remote cache base URL (default: unset, in-process cache)
    /// - `ORDER_LIST_TTL` - Snapshot TTL in seconds (default: 30)
    /// - `MAX_CACHE_ENTRIES` - In-process cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 1)
    /// - `NOTIFICATION_URL` - Notification endpoint (default: http://127.0.0.1:8001/email)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            server_port: parsed(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: text("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            cache_url: text("CACHE_URL"),
            order_list_ttl: parsed(&lookup, "ORDER_LIST_TTL").unwrap_or(defaults.order_list_ttl),
            max_cache_entries: parsed(&lookup, "MAX_CACHE_ENTRIES")
                .unwrap_or(defaults.max_cache_entries),
            cleanup_interval: parsed(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            notification_url: text("NOTIFICATION_URL").unwrap_or(defaults.notification_url),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            database_url: "sqlite://orders.db?mode=rwc".to_string(),
            db_max_connections: 5,
            cache_url: None,
            order_list_ttl: DEFAULT_ORDER_LIST_TTL,
            max_cache_entries: 1000,
            cleanup_interval: 1,
            notification_url: "http://127.0.0.1:8001/email".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.order_list_ttl, 30);
        assert_eq!(config.cache_url, None);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "9100"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CACHE_URL", "http://cache:3000"),
            ("ORDER_LIST_TTL", " 5 "),
            ("NOTIFICATION_URL", "http://notify:8001/email"),
        ]);

        assert_eq!(config.server_port, 9100);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.cache_url.as_deref(), Some("http://cache:3000"));
        assert_eq!(config.order_list_ttl, 5);
        assert_eq!(config.notification_url, "http://notify:8001/email");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("ORDER_LIST_TTL", "-1"),
            ("CACHE_URL", "  "),
        ]);

        assert_eq!(config.server_port, 8000);
        assert_eq!(config.order_list_ttl, 30);
        assert_eq!(config.cache_url, None);
    }
}
