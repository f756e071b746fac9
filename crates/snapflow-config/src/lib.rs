//! Credential and settings management for snapflow
//!
//! Resolves the Hetzner Cloud API token (macOS Keychain first, then the
//! environment) and reads runtime settings from environment variables.

pub mod error;
pub mod keychain;
pub mod settings;

pub use error::{ConfigError, Result};
pub use keychain::{KEYCHAIN_SERVICE, MacKeychain, SecretStore, platform_secret_store};
pub use settings::{
    ENDPOINT_ENV_VAR, POLL_INTERVAL_ENV_VAR, POLL_MAX_ATTEMPTS_ENV_VAR, Settings,
};

/// Environment variable consulted when the secret store has no token
pub const TOKEN_ENV_VAR: &str = "HETZNER_API_TOKEN";

/// Resolve the API token.
///
/// Lookup order:
/// 1. the platform secret store, when one is available
/// 2. the `HETZNER_API_TOKEN` environment variable
///
/// A failing secret store is logged and skipped; missing everywhere is
/// [`ConfigError::MissingToken`].
pub async fn resolve_token(store: Option<&dyn SecretStore>) -> Result<String> {
    if let Some(store) = store {
        match store.get().await {
            Ok(Some(token)) => {
                tracing::debug!("API token loaded from {}", store.name());
                return Ok(token);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Secret store lookup failed: {}", e);
            }
        }
    }

    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ConfigError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serial_test::serial;

    struct StubStore {
        token: Option<String>,
        fail: bool,
    }

    #[async_trait]
    impl SecretStore for StubStore {
        fn name(&self) -> &str {
            "stub store"
        }

        async fn get(&self) -> Result<Option<String>> {
            if self.fail {
                return Err(ConfigError::KeychainCommandFailed("boom".to_string()));
            }
            Ok(self.token.clone())
        }

        async fn store(&self, _token: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_token_from_env() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
        }

        let token = resolve_token(None).await.unwrap();
        assert_eq!(token, "env-token");

        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_token_everywhere() {
        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }

        let err = resolve_token(None).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[tokio::test]
    #[serial]
    async fn test_store_takes_priority_over_env() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
        }

        let store = StubStore {
            token: Some("store-token".to_string()),
            fail: false,
        };
        let token = resolve_token(Some(&store)).await.unwrap();
        assert_eq!(token, "store-token");

        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_empty_store_falls_back_to_env() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
        }

        let store = StubStore {
            token: None,
            fail: false,
        };
        let token = resolve_token(Some(&store)).await.unwrap();
        assert_eq!(token, "env-token");

        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_failing_store_falls_back_to_env() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "env-token");
        }

        let store = StubStore {
            token: None,
            fail: true,
        };
        let token = resolve_token(Some(&store)).await.unwrap();
        assert_eq!(token, "env-token");

        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
    }
}
