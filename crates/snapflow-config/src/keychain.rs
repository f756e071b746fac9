//! macOS Keychain integration
//!
//! Wraps the `security` CLI for storing and retrieving the API token.
//! The entry is a generic password under a fixed service name, the same
//! one earlier releases used, so stored tokens survive upgrades.

use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Keychain service name for the API token entry
pub const KEYCHAIN_SERVICE: &str = "HetznerAPIKey";

/// Platform secret store for the API token
///
/// Only macOS has an implementation today; on other platforms the token
/// comes from the environment.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Store name for menus and messages
    fn name(&self) -> &str;

    /// Fetch the stored token, `None` when no entry exists
    async fn get(&self) -> Result<Option<String>>;

    /// Store or replace the token
    async fn store(&self, token: &str) -> Result<()>;
}

/// The secret store for the current platform, when one exists.
pub fn platform_secret_store() -> Option<Box<dyn SecretStore>> {
    #[cfg(target_os = "macos")]
    {
        Some(Box::new(MacKeychain::new()))
    }
    #[cfg(not(target_os = "macos"))]
    {
        None
    }
}

/// macOS Keychain-backed secret store
pub struct MacKeychain {
    service: String,
}

impl MacKeychain {
    pub fn new() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
        }
    }

    /// Run a `security` subcommand and collect its output.
    async fn run_security(&self, args: &[&str]) -> Result<std::process::Output> {
        let mut cmd = Command::new("security");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: security {}", args.join(" "));

        Ok(cmd.output().await?)
    }
}

impl Default for MacKeychain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for MacKeychain {
    fn name(&self) -> &str {
        "macOS Keychain"
    }

    async fn get(&self) -> Result<Option<String>> {
        let output = self
            .run_security(&["find-generic-password", "-s", &self.service, "-w"])
            .await?;

        // A missing entry is the common case, not an error.
        if !output.status.success() {
            tracing::debug!("No Keychain entry for service {}", self.service);
            return Ok(None);
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!token.is_empty()).then_some(token))
    }

    async fn store(&self, token: &str) -> Result<()> {
        // -U updates an existing entry in place.
        let output = self
            .run_security(&["add-generic-password", "-U", "-s", &self.service, "-w", token])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConfigError::KeychainCommandFailed(
                stderr.trim().to_string(),
            ));
        }

        tracing::debug!("Stored token under Keychain service {}", self.service);
        Ok(())
    }
}
