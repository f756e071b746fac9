//! Hetzner Cloud API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HcloudError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by the API: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HcloudError>;
