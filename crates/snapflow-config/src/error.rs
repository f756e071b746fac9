use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "No API token found. Provide one via:\n\
        - the HETZNER_API_TOKEN environment variable\n\
        - the macOS Keychain (store it from the main menu, option 0)"
    )]
    MissingToken,

    #[error("Keychain command failed: {0}")]
    KeychainCommandFailed(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidSetting { var: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
