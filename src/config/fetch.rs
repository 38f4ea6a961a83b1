use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Subtitle/0.1)";
pub const DEFAULT_BODY_CAP_BYTES: usize = 1024 * 1024;

/// Configuration for title fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Retries allowed after a 4xx/5xx or transport failure (default: 5)
    pub max_retries: u32,

    /// Redirects followed before giving up on a chain (default: 10)
    pub max_redirects: u32,

    /// Only this many body bytes are ever scanned for a title (default: 1 MiB)
    pub body_cap_bytes: usize,

    /// Bound on awaiting response headers and on awaiting each body chunk (default: 15)
    pub request_timeout_secs: u64,

    /// Base delay before the first retry, doubled per retry (default: 250)
    pub retry_backoff_ms: u64,

    /// Maximum fetches in flight at once (default: 10)
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: 5,
            max_redirects: 10,
            body_cap_bytes: DEFAULT_BODY_CAP_BYTES,
            request_timeout_secs: 15,
            retry_backoff_ms: 250,
            max_concurrency: 10,
        }
    }
}

impl FetchConfig {
    /// Get the request timeout as a Duration, never shorter than one second
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Delay before the given retry (1-based), capped at 8x the base
    pub fn retry_backoff(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(3);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.body_cap_bytes, 1024 * 1024);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_concurrency, 10);
    }

    #[test]
    fn test_zero_timeout_is_raised_to_one_second() {
        let config = FetchConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_retry_backoff_doubles_then_caps() {
        let config = FetchConfig {
            retry_backoff_ms: 100,
            ..Default::default()
        };
        assert_eq!(config.retry_backoff(1), Duration::from_millis(100));
        assert_eq!(config.retry_backoff(2), Duration::from_millis(200));
        assert_eq!(config.retry_backoff(4), Duration::from_millis(800));
        assert_eq!(config.retry_backoff(9), Duration::from_millis(800));
    }

    #[test]
    fn test_zero_backoff() {
        let config = FetchConfig {
            retry_backoff_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.retry_backoff(3), Duration::ZERO);
    }
}
