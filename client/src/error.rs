//! Error handling for the farm dashboard client

use reqwest::StatusCode;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    // Setup errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// True when the backend answered with a non-success status
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}

/// Result type alias for API calls
pub type ClientResult<T> = Result<T, ClientError>;
