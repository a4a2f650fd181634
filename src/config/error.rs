//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host/port combination")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid base URL for {0}")]
    InvalidBaseUrl(&'static str),

    #[error("Processor base URL must use HTTPS in production")]
    BaseUrlMustBeHttps,

    #[error("Invalid path for {0}: must start with '/'")]
    InvalidPath(&'static str),

    #[error("Invalid webhook freshness window")]
    InvalidFreshnessWindow,
}
