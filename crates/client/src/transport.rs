//! Transport collaborator contract.
//!
//! Responsibilities:
//! - Define the opaque resource token handed out by the transport factory.
//! - Define the `Transport` trait the handle and refresh bridge call into.
//!
//! Does NOT handle:
//! - Opening connections or the refresh wire exchange (implementors do).
//! - Ownership of the token (see `handle.rs`).
//!
//! Invariants / Assumptions:
//! - `ResourceToken` is neither `Clone` nor `Copy`; exactly one owner exists.
//! - `release` is called exactly once per token returned by `create_resource`.
//! - `submit_token_refresh` must either resolve the completion or drop it;
//!   dropping resolves it with `RefreshFailed`.

use std::fmt;
use std::num::NonZeroU64;

use openapi_config::ValidatedParams;
use thiserror::Error;
use time::OffsetDateTime;

use crate::refresh::RefreshCompletion;

/// Opaque identifier of a transport-side connection-configuration resource.
#[derive(PartialEq, Eq, Hash)]
pub struct ResourceToken(NonZeroU64);

impl ResourceToken {
    pub fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for ResourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceToken(#{})", self.0)
    }
}

/// Errors reported synchronously by a transport factory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The parameter set was refused (e.g. unknown app key).
    #[error("parameters rejected: {0}")]
    Rejected(String),

    /// The transport could not allocate a resource right now.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// The network/protocol engine behind a `ConfigHandle`.
///
/// Implementations own the worker that performs refreshes; completions may
/// be resolved on any thread.
pub trait Transport: Send + Sync {
    /// Allocate a resource for `params`.
    fn create_resource(&self, params: &ValidatedParams) -> Result<ResourceToken, TransportError>;

    /// Start an access token refresh for `resource` bound to `expired_at`.
    ///
    /// Must return without waiting for the exchange. The outcome goes to
    /// `completion`; callers must serialize refreshes on one resource.
    fn submit_token_refresh(
        &self,
        resource: &ResourceToken,
        expired_at: OffsetDateTime,
        completion: RefreshCompletion,
    );

    /// Release a resource. The token is dead once this returns.
    fn release(&self, resource: &ResourceToken);
}
