//! Runtime settings
//!
//! Everything is sourced from environment variables with fixed
//! defaults. There is no settings file.

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Overrides the API endpoint (tests, API-compatible mocks)
pub const ENDPOINT_ENV_VAR: &str = "HCLOUD_ENDPOINT";

/// Overrides the delay between action status polls, in seconds
pub const POLL_INTERVAL_ENV_VAR: &str = "SNAPFLOW_POLL_INTERVAL_SECS";

/// Overrides the poll attempt budget
pub const POLL_MAX_ATTEMPTS_ENV_VAR: &str = "SNAPFLOW_POLL_MAX_ATTEMPTS";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
// 720 attempts x 5 seconds, roughly one hour.
const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 720;

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// API endpoint; `None` means the public API
    pub endpoint: Option<String>,

    /// Delay between two action status polls
    pub poll_interval: Duration,

    /// Status polls before giving up on an action
    pub poll_max_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                settings.endpoint = Some(endpoint.trim_end_matches('/').to_string());
            }
        }
        if let Some(secs) = parse_env_var::<u64>(POLL_INTERVAL_ENV_VAR)? {
            settings.poll_interval = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_env_var::<u32>(POLL_MAX_ATTEMPTS_ENV_VAR)? {
            settings.poll_max_attempts = attempts;
        }

        Ok(settings)
    }
}

fn parse_env_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSetting {
                var: var.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, None);
        assert_eq!(settings.poll_interval, Duration::from_secs(5));
        assert_eq!(settings.poll_max_attempts, 720);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                (ENDPOINT_ENV_VAR, Some("http://127.0.0.1:4000/")),
                (POLL_INTERVAL_ENV_VAR, Some("1")),
                (POLL_MAX_ATTEMPTS_ENV_VAR, Some("3")),
            ],
            || {
                let settings = Settings::from_env().unwrap();
                // Trailing slash is stripped so URL building stays simple.
                assert_eq!(settings.endpoint.as_deref(), Some("http://127.0.0.1:4000"));
                assert_eq!(settings.poll_interval, Duration::from_secs(1));
                assert_eq!(settings.poll_max_attempts, 3);
            },
        );
    }

    #[test]
    #[serial]
    fn test_unset_vars_keep_defaults() {
        temp_env::with_vars(
            [
                (ENDPOINT_ENV_VAR, None::<&str>),
                (POLL_INTERVAL_ENV_VAR, None),
                (POLL_MAX_ATTEMPTS_ENV_VAR, None),
            ],
            || {
                let settings = Settings::from_env().unwrap();
                assert_eq!(settings.endpoint, None);
                assert_eq!(settings.poll_interval, Duration::from_secs(5));
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_interval_is_rejected() {
        temp_env::with_vars([(POLL_INTERVAL_ENV_VAR, Some("soon"))], || {
            let err = Settings::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSetting { .. }));
            assert!(err.to_string().contains(POLL_INTERVAL_ENV_VAR));
        });
    }
}
