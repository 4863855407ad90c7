//! Testing utilities for client tests.
//!
//! This module provides a scriptable in-memory `Transport` that counts
//! resource releases and resolves refresh completions the way a real
//! transport worker would.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use openapi_client::testing::{MockTransport, RefreshBehavior};
//!
//! let transport = Arc::new(MockTransport::new().with_refresh(RefreshBehavior::Fail("revoked".into())));
//! let handle = ConfigHandle::new(params, transport.clone())?;
//! drop(handle);
//! assert_eq!(transport.release_count(), 1);
//! ```

mod transport;

pub use transport::{MockTransport, RefreshBehavior};
