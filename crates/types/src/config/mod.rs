mod env_utils;
pub use env_utils::{load_string, load_string_opt, load_u64, load_u64_opt, load_url};

mod error;
pub use error::ConfigError;

use crate::NetworkMatch;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Env var for the relayer poll interval, in milliseconds.
pub const POLL_INTERVAL_MS_ENV: &str = "TXFLOW_RELAYER_POLL_INTERVAL_MS";
/// Env var for the relayer poll timeout, in seconds.
pub const POLL_TIMEOUT_SECS_ENV: &str = "TXFLOW_RELAYER_POLL_TIMEOUT_SECS";
/// Env var for the relayer listing page size.
pub const PAGE_SIZE_ENV: &str = "TXFLOW_RELAYER_PAGE_SIZE";
/// Env var for the relayer service URL.
pub const RELAYER_URL_ENV: &str = "TXFLOW_RELAYER_URL";

/// Default delay between relayer status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default bound on waiting for a relayer transaction.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Default relayer listing page size.
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Shortest delay the poll loop will wait between status queries.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing of the relayer status poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between status queries.
    pub interval: Duration,
    /// Overall bound, measured from loop entry.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_POLL_INTERVAL, timeout: DEFAULT_POLL_TIMEOUT }
    }
}

impl PollConfig {
    /// Create a poll config.
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// The delay between status queries, never shorter than
    /// [`MIN_POLL_INTERVAL`].
    pub const fn effective_interval(&self) -> Duration {
        if self.interval.as_nanos() < MIN_POLL_INTERVAL.as_nanos() {
            MIN_POLL_INTERVAL
        } else {
            self.interval
        }
    }

    /// Load from [`POLL_INTERVAL_MS_ENV`] and [`POLL_TIMEOUT_SECS_ENV`],
    /// using defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval = match load_u64_opt(POLL_INTERVAL_MS_ENV)? {
            Some(0) => return Err(ConfigError::invalid(POLL_INTERVAL_MS_ENV, "must be non-zero")),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };
        let timeout = load_u64_opt(POLL_TIMEOUT_SECS_ENV)?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_TIMEOUT);
        Ok(Self { interval, timeout })
    }
}

/// Relayer listing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    /// Items requested per page.
    pub page_size: u32,
    /// Network compatibility rule.
    #[serde(default)]
    pub network_match: NetworkMatch,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE, network_match: NetworkMatch::Exact }
    }
}

impl DiscoveryConfig {
    /// Load the page size from [`PAGE_SIZE_ENV`], defaulting when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let page_size = match load_u64_opt(PAGE_SIZE_ENV)? {
            None => DEFAULT_PAGE_SIZE,
            Some(size) => u32::try_from(size)
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| ConfigError::invalid(PAGE_SIZE_ENV, "must be in 1..=u32::MAX"))?,
        };
        Ok(Self { page_size, ..Default::default() })
    }
}

/// Location of the relayer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerServiceConfig {
    /// Base URL of the relayer service.
    pub service_url: Url,
}

impl RelayerServiceConfig {
    /// Load from [`RELAYER_URL_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self { service_url: load_url(RELAYER_URL_ENV)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch process env vars.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `f` with `vars` set, restoring their previous values afterwards.
    fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let saved: Vec<_> = vars.iter().map(|(key, _)| (*key, std::env::var_os(key))).collect();
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        result.unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }

    #[test]
    fn poll_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn poll_from_env() {
        let config = with_env(
            &[(POLL_INTERVAL_MS_ENV, Some("500")), (POLL_TIMEOUT_SECS_ENV, Some("30"))],
            PollConfig::from_env,
        )
        .unwrap();
        assert_eq!(config, PollConfig::new(Duration::from_millis(500), Duration::from_secs(30)));

        let err = with_env(&[(POLL_INTERVAL_MS_ENV, Some("0"))], PollConfig::from_env);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn page_size_from_env() {
        let err = with_env(&[(PAGE_SIZE_ENV, Some("0"))], DiscoveryConfig::from_env);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));

        let config = with_env(&[(PAGE_SIZE_ENV, Some("25"))], DiscoveryConfig::from_env);
        assert_eq!(config.unwrap().page_size, 25);
    }

    #[test]
    fn missing_relayer_url() {
        let result = with_env(&[(RELAYER_URL_ENV, None)], RelayerServiceConfig::from_env);
        assert!(matches!(result, Err(ConfigError::Var(_))));
    }

    #[test]
    fn interval_has_a_floor() {
        let zero = PollConfig::new(Duration::ZERO, Duration::from_secs(1));
        assert_eq!(zero.effective_interval(), MIN_POLL_INTERVAL);

        let slow = PollConfig::new(Duration::from_secs(3), Duration::from_secs(10));
        assert_eq!(slow.effective_interval(), Duration::from_secs(3));
    }

    #[test]
    fn discovery_config_json() {
        let config: DiscoveryConfig =
            serde_json::from_str(r#"{"pageSize":10,"networkMatch":"contains"}"#).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.network_match, NetworkMatch::Contains);
    }
}
