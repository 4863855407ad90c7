//! Release-counting mock transport.

use std::num::NonZeroU64;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use openapi_config::ValidatedParams;
use secrecy::SecretString;
use time::OffsetDateTime;

use crate::refresh::RefreshCompletion;
use crate::transport::{ResourceToken, Transport, TransportError};

/// How `MockTransport` answers refresh submissions.
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    /// Resolve with this token from a worker thread.
    Succeed(String),
    /// Resolve with `RefreshFailed(detail)` from a worker thread.
    Fail(String),
    /// Drop the completion on a worker thread without resolving it.
    Drop,
    /// Keep the completion until `take_held` is called.
    Hold,
}

/// In-memory `Transport` for tests.
#[derive(Debug)]
pub struct MockTransport {
    next_id: AtomicU64,
    reject_with: Option<String>,
    refresh: RefreshBehavior,
    submissions: AtomicUsize,
    released: Mutex<Vec<u64>>,
    held: Mutex<Vec<RefreshCompletion>>,
    last_expiry: Mutex<Option<OffsetDateTime>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            reject_with: None,
            refresh: RefreshBehavior::Succeed("refreshed-token".to_string()),
            submissions: AtomicUsize::new(0),
            released: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
            last_expiry: Mutex::new(None),
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_resource` fail with `TransportError::Rejected(reason)`.
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.reject_with = Some(reason.into());
        self
    }

    pub fn with_refresh(mut self, behavior: RefreshBehavior) -> Self {
        self.refresh = behavior;
        self
    }

    /// Number of resources handed out.
    pub fn created_count(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }

    pub fn release_count(&self) -> usize {
        self.released.lock().unwrap().len()
    }

    /// Released resource ids, in release order.
    pub fn released_ids(&self) -> Vec<u64> {
        self.released.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn last_expiry(&self) -> Option<OffsetDateTime> {
        *self.last_expiry.lock().unwrap()
    }

    /// Completions kept under `RefreshBehavior::Hold`.
    pub fn take_held(&self) -> Vec<RefreshCompletion> {
        std::mem::take(&mut *self.held.lock().unwrap())
    }
}

impl Transport for MockTransport {
    fn create_resource(&self, _params: &ValidatedParams) -> Result<ResourceToken, TransportError> {
        if let Some(reason) = &self.reject_with {
            return Err(TransportError::Rejected(reason.clone()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = NonZeroU64::new(id).expect("ids start at 1");
        Ok(ResourceToken::new(id))
    }

    fn submit_token_refresh(
        &self,
        _resource: &ResourceToken,
        expired_at: OffsetDateTime,
        completion: RefreshCompletion,
    ) {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.last_expiry.lock().unwrap() = Some(expired_at);

        match self.refresh.clone() {
            RefreshBehavior::Succeed(token) => {
                std::thread::spawn(move || completion.succeed(SecretString::from(token)));
            }
            RefreshBehavior::Fail(detail) => {
                std::thread::spawn(move || completion.fail(detail));
            }
            RefreshBehavior::Drop => {
                std::thread::spawn(move || drop(completion));
            }
            RefreshBehavior::Hold => self.held.lock().unwrap().push(completion),
        }
    }

    fn release(&self, resource: &ResourceToken) {
        self.released.lock().unwrap().push(resource.id());
    }
}
