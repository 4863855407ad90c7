//! Ownership of a validated parameter set and its transport resource.
//!
//! Responsibilities:
//! - Create the transport resource for a `ValidatedParams`.
//! - Release that resource exactly once when the handle goes away.
//! - Expose the resource to collaborators through borrowed views only.
//!
//! Does NOT handle:
//! - Token refresh (see `refresh.rs`).
//! - Updating the stored access token; the transport owns rotated tokens.
//!
//! Invariants / Assumptions:
//! - `ConfigHandle` is move-only. A moved-from binding is statically dead,
//!   so only the final owner releases.
//! - Borrowed views (`resource()`, `AsRef`) cannot outlive the handle.

use std::fmt;
use std::sync::Arc;

use openapi_config::ValidatedParams;

use crate::error::{ClientError, Result};
use crate::transport::{ResourceToken, Transport};

/// A transport resource plus the transport that must release it.
struct OwnedResource {
    token: ResourceToken,
    transport: Arc<dyn Transport>,
}

impl Drop for OwnedResource {
    fn drop(&mut self) {
        tracing::debug!(resource = self.token.id(), "releasing transport resource");
        self.transport.release(&self.token);
    }
}

/// Owner of one `ValidatedParams` and one transport resource.
pub struct ConfigHandle {
    params: ValidatedParams,
    resource: OwnedResource,
}

impl ConfigHandle {
    /// Hand `params` to the transport factory and take ownership of the
    /// resulting resource.
    ///
    /// # Errors
    /// `ResourceCreationFailed` if the transport rejects the parameter set.
    pub fn new(params: ValidatedParams, transport: Arc<dyn Transport>) -> Result<Self> {
        let token = transport.create_resource(&params).map_err(|e| {
            tracing::warn!(error = %e, "transport rejected parameter set");
            ClientError::ResourceCreationFailed(e)
        })?;

        tracing::info!(
            resource = token.id(),
            http_url = params.endpoints().http_url(),
            "created config handle"
        );

        Ok(Self {
            params,
            resource: OwnedResource { token, transport },
        })
    }

    /// Resolve parameters from the environment, then create the handle.
    pub fn from_env(transport: Arc<dyn Transport>) -> Result<Self> {
        let params = ValidatedParams::from_env()?;
        Self::new(params, transport)
    }

    pub fn params(&self) -> &ValidatedParams {
        &self.params
    }

    /// Non-owning view of the transport resource.
    pub fn resource(&self) -> &ResourceToken {
        &self.resource.token
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.resource.transport.as_ref()
    }

    /// Release the transport resource and return the parameter set.
    pub fn into_params(self) -> ValidatedParams {
        let Self { params, resource } = self;
        drop(resource);
        params
    }
}

impl AsRef<ResourceToken> for ConfigHandle {
    fn as_ref(&self) -> &ResourceToken {
        self.resource()
    }
}

impl fmt::Debug for ConfigHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigHandle")
            .field("params", &self.params)
            .field("resource", &self.resource.token)
            .finish()
    }
}
