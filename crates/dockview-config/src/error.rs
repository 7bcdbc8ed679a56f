//! Error types for configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid daemon address '{address}': {reason}")]
    InvalidHost { address: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
