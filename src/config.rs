//! Session cache configuration.
//!
//! | Field                    | Type       | Default | Description                           |
//! |--------------------------|------------|---------|---------------------------------------|
//! | `max_entries`            | `usize`    | 1024    | Upper bound on live entries           |
//! | `timeout`                | `Duration` | 1 hour  | Age at which an entry becomes stale   |
//! | `expiration_check_count` | `u32`      | 256     | Lookups between full expiry sweeps    |

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MAX_ENTRIES: usize = 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_EXPIRATION_CHECK_COUNT: u32 = 256;

/// Options for a [`SessionCache`](crate::cache::SessionCache).
///
/// ```
/// use std::time::Duration;
/// use tls_session_cache::config::SessionCacheConfig;
///
/// let config = SessionCacheConfig::default()
///     .with_max_entries(3)
///     .with_timeout(Duration::from_secs(1000))
///     .with_expiration_check_count(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SessionCacheConfig {
    pub max_entries: usize,
    pub timeout: Duration,
    pub expiration_check_count: u32,
}

impl Default for SessionCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            timeout: DEFAULT_TIMEOUT,
            expiration_check_count: DEFAULT_EXPIRATION_CHECK_COUNT,
        }
    }
}

impl SessionCacheConfig {
    #[must_use]
    pub const fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_expiration_check_count(mut self, count: u32) -> Self {
        self.expiration_check_count = count;
        self
    }

    /// Checks the parameters a cache cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_entries` or `expiration_check_count` is
    /// zero. A zero `timeout` is allowed and makes every entry stale on sight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::new("max_entries must be greater than zero"));
        }
        if self.expiration_check_count == 0 {
            return Err(ConfigError::new(
                "expiration_check_count must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionCacheConfig::default();
        assert_eq!(config.max_entries, 1024);
        assert_eq!(config.timeout, Duration::from_secs(3600));
        assert_eq!(config.expiration_check_count, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = SessionCacheConfig::default()
            .with_max_entries(3)
            .with_timeout(Duration::from_secs(5))
            .with_expiration_check_count(7);
        assert_eq!(
            config,
            SessionCacheConfig {
                max_entries: 3,
                timeout: Duration::from_secs(5),
                expiration_check_count: 7,
            }
        );
    }

    #[test]
    fn zero_max_entries_rejected() {
        let err = SessionCacheConfig::default()
            .with_max_entries(0)
            .validate()
            .unwrap_err();
        assert!(err.message().contains("max_entries"));
    }

    #[test]
    fn zero_check_count_rejected() {
        let err = SessionCacheConfig::default()
            .with_expiration_check_count(0)
            .validate()
            .unwrap_err();
        assert!(err.message().contains("expiration_check_count"));
    }

    #[test]
    fn zero_timeout_accepted() {
        let config = SessionCacheConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults_for_missing_fields() {
        let config: SessionCacheConfig =
            serde_json::from_str(r#"{ "max_entries": 8 }"#).unwrap();
        assert_eq!(config.max_entries, 8);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.expiration_check_count, DEFAULT_EXPIRATION_CHECK_COUNT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_unknown_fields() {
        let result: Result<SessionCacheConfig, _> =
            serde_json::from_str(r#"{ "max_entires": 8 }"#);
        assert!(result.is_err());
    }
}
