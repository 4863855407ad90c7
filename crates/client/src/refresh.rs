//! Asynchronous access token refresh.
//!
//! Responsibilities:
//! - Reject expiries that are not in the future before anything is submitted.
//! - Hand the transport a one-shot `RefreshCompletion` and return immediately.
//! - Adapt the completion into a future for async callers.
//!
//! Does NOT handle:
//! - Timeouts. A transport that never resolves never fires the completion.
//! - Serializing concurrent refreshes on one handle (caller precondition).
//! - Storing the rotated token on the handle; the transport owns it.
//!
//! Invariants / Assumptions:
//! - Every accepted submission invokes its completion exactly once.
//! - A completion dropped unresolved reports `RefreshFailed`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use time::OffsetDateTime;
use tokio::sync::oneshot;

use crate::error::{ClientError, Result};
use crate::handle::ConfigHandle;

/// Outcome delivered to a refresh completion: the rotated access token or
/// `RefreshFailed`.
pub type RefreshOutcome = std::result::Result<SecretString, ClientError>;

type Callback = Box<dyn FnOnce(RefreshOutcome) + Send + 'static>;

/// One-shot completion for a submitted refresh.
///
/// Consumed by `succeed`/`fail`. If dropped without either, it resolves
/// itself with `RefreshFailed`.
pub struct RefreshCompletion {
    resource: u64,
    callback: Option<Callback>,
}

impl RefreshCompletion {
    pub fn new<F>(resource: u64, callback: F) -> Self
    where
        F: FnOnce(RefreshOutcome) + Send + 'static,
    {
        Self {
            resource,
            callback: Some(Box::new(callback)),
        }
    }

    /// Resource the refresh was submitted for.
    pub fn resource_id(&self) -> u64 {
        self.resource
    }

    /// Report the rotated access token.
    ///
    /// An empty token is reported as `RefreshFailed`.
    pub fn succeed(mut self, token: SecretString) {
        let outcome = if token.expose_secret().trim().is_empty() {
            Err(ClientError::RefreshFailed(
                "transport returned an empty access token".to_string(),
            ))
        } else {
            Ok(token)
        };
        self.resolve(outcome);
    }

    /// Report a transport-side failure.
    pub fn fail(mut self, detail: impl Into<String>) {
        self.resolve(Err(ClientError::RefreshFailed(detail.into())));
    }

    fn resolve(&mut self, outcome: RefreshOutcome) {
        if let Some(callback) = self.callback.take() {
            match &outcome {
                Ok(_) => tracing::info!(resource = self.resource, "access token refreshed"),
                Err(e) => {
                    tracing::warn!(resource = self.resource, error = %e, "access token refresh failed")
                }
            }
            callback(outcome);
        }
    }
}

impl Drop for RefreshCompletion {
    fn drop(&mut self) {
        if self.callback.is_some() {
            self.resolve(Err(ClientError::RefreshFailed(
                "transport dropped the refresh without a result".to_string(),
            )));
        }
    }
}

impl fmt::Debug for RefreshCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshCompletion")
            .field("resource", &self.resource)
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// Convert a Unix timestamp in seconds into a refresh expiry.
pub fn expiry_from_unix_timestamp(seconds: i64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| ClientError::InvalidArgument(format!("expiry timestamp {seconds}: {e}")))
}

impl ConfigHandle {
    /// Submit an access token refresh valid until `expired_at`.
    ///
    /// Returns as soon as the transport has the request. `completion` runs
    /// exactly once, possibly on another thread, with the rotated token or
    /// `RefreshFailed`. The token stored in [`ConfigHandle::params`] is left
    /// as is.
    ///
    /// Callers must not run two refreshes on one handle concurrently.
    ///
    /// # Errors
    /// `InvalidArgument` if `expired_at` is not strictly in the future. The
    /// completion is not invoked in that case.
    pub fn refresh_access_token<F>(&self, expired_at: OffsetDateTime, completion: F) -> Result<()>
    where
        F: FnOnce(RefreshOutcome) + Send + 'static,
    {
        let now = OffsetDateTime::now_utc();
        if expired_at <= now {
            return Err(ClientError::InvalidArgument(format!(
                "expiry {expired_at} is not in the future"
            )));
        }

        let resource = self.resource();
        tracing::debug!(resource = resource.id(), %expired_at, "submitting access token refresh");
        self.transport().submit_token_refresh(
            resource,
            expired_at,
            RefreshCompletion::new(resource.id(), completion),
        );
        Ok(())
    }

    /// Like [`ConfigHandle::refresh_access_token`], awaiting the outcome.
    ///
    /// Never resolves if the transport never does; wrap in
    /// `tokio::time::timeout` for bounded latency.
    pub async fn refresh_access_token_async(
        &self,
        expired_at: OffsetDateTime,
    ) -> Result<SecretString> {
        let (tx, rx) = oneshot::channel();
        self.refresh_access_token(expired_at, move |outcome| {
            let _ = tx.send(outcome);
        })?;

        rx.await.unwrap_or_else(|_| {
            Err(ClientError::RefreshFailed(
                "refresh completion was lost".to_string(),
            ))
        })
    }
}
