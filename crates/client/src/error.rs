//! Error types for the OpenAPI client core.

use openapi_config::ConfigError;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while creating handles or refreshing tokens.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A submission argument was rejected before reaching the transport.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parameter resolution failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport factory rejected the parameter set.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(#[from] TransportError),

    /// Token refresh failed. Only ever delivered through a completion.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// The global log subscriber could not be installed.
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    /// I/O error while preparing the log directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Check if this error came from parameter resolution or argument checks,
    /// as opposed to the transport.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Config(_))
    }
}
