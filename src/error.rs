//! Error types for the session cache.
//!
//! Cache operations themselves cannot fail; the only fallible surface is
//! construction from a [`SessionCacheConfig`](crate::config::SessionCacheConfig).
//!
//! ```
//! use tls_session_cache::config::SessionCacheConfig;
//! use tls_session_cache::error::ConfigError;
//!
//! let err: ConfigError = SessionCacheConfig::default()
//!     .with_max_entries(0)
//!     .validate()
//!     .unwrap_err();
//! assert!(err.to_string().contains("max_entries"));
//! ```

use thiserror::Error;

/// Error returned when session cache configuration parameters are invalid.
///
/// Carries a human-readable description of which parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message() {
        let err = ConfigError::new("max_entries must be greater than zero");
        assert_eq!(err.to_string(), "max_entries must be greater than zero");
    }

    #[test]
    fn message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn clone_and_eq() {
        let a = ConfigError::new("x");
        assert_eq!(a, a.clone());
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
