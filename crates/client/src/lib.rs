//! OpenAPI client core.
//!
//! This crate owns the transport resource created for a resolved parameter
//! set and bridges asynchronous access token refreshes to the transport.
//! Parameter resolution itself lives in `openapi-config`.

pub mod error;
mod handle;
pub mod logging;
mod refresh;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ClientError, Result};
pub use handle::ConfigHandle;
pub use logging::init_file_logging;
pub use refresh::{RefreshCompletion, RefreshOutcome, expiry_from_unix_timestamp};
pub use transport::{ResourceToken, Transport, TransportError};

pub use openapi_config::{ConfigError, ConfigLoader, ValidatedParams};
