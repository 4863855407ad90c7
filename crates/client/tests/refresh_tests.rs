//! Access token refresh tests through the public API.
//!
//! These tests verify the exactly-once completion guarantee for every way a
//! transport can answer, and the synchronous rejection of stale expiries.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use openapi_client::testing::{MockTransport, RefreshBehavior};
use openapi_client::{
    ClientError, ConfigHandle, ConfigLoader, RefreshOutcome, expiry_from_unix_timestamp,
};
use secrecy::ExposeSecret;
use time::{Duration, OffsetDateTime};

const WAIT: StdDuration = StdDuration::from_secs(5);
const QUIET: StdDuration = StdDuration::from_millis(200);

fn handle_with(behavior: RefreshBehavior) -> (Arc<MockTransport>, ConfigHandle) {
    let transport = Arc::new(MockTransport::new().with_refresh(behavior));
    let params = ConfigLoader::from_credentials("app-key", "app-secret", "original-token")
        .build()
        .unwrap();
    let handle = ConfigHandle::new(params, transport.clone()).unwrap();
    (transport, handle)
}

fn in_one_hour() -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::hours(1)
}

/// Submit a refresh and collect every completion invocation.
fn submit(handle: &ConfigHandle) -> mpsc::Receiver<RefreshOutcome> {
    let (tx, rx) = mpsc::channel();
    handle
        .refresh_access_token(in_one_hour(), move |outcome| {
            tx.send(outcome).unwrap();
        })
        .expect("future expiry is accepted");
    rx
}

/// Receive exactly one outcome and make sure no second one follows.
fn exactly_one(rx: mpsc::Receiver<RefreshOutcome>) -> RefreshOutcome {
    let outcome = rx.recv_timeout(WAIT).expect("completion must fire");
    assert!(
        rx.recv_timeout(QUIET).is_err(),
        "completion must not fire twice"
    );
    outcome
}

#[test]
fn test_successful_refresh_fires_once() {
    let (transport, handle) = handle_with(RefreshBehavior::Succeed("rotated".into()));

    let outcome = exactly_one(submit(&handle));
    assert_eq!(outcome.unwrap().expose_secret(), "rotated");
    assert_eq!(transport.submission_count(), 1);

    // Transport owns the rotated token
    assert_eq!(
        handle.params().credentials().access_token().expose_secret(),
        "original-token"
    );
}

#[test]
fn test_failed_refresh_fires_once() {
    let (_transport, handle) = handle_with(RefreshBehavior::Fail("token revoked".into()));

    match exactly_one(submit(&handle)) {
        Err(ClientError::RefreshFailed(detail)) => assert_eq!(detail, "token revoked"),
        other => panic!("expected RefreshFailed, got {other:?}"),
    }
    assert_eq!(
        handle.params().credentials().access_token().expose_secret(),
        "original-token"
    );
}

#[test]
fn test_dropped_completion_fires_once_with_failure() {
    let (_transport, handle) = handle_with(RefreshBehavior::Drop);

    assert!(matches!(
        exactly_one(submit(&handle)),
        Err(ClientError::RefreshFailed(_))
    ));
}

#[test]
fn test_held_completion_fires_only_when_resolved() {
    let (transport, handle) = handle_with(RefreshBehavior::Hold);
    let rx = submit(&handle);

    assert!(rx.recv_timeout(QUIET).is_err(), "nothing fires while held");

    let mut held = transport.take_held();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].resource_id(), handle.resource().id());
    held.pop().unwrap().succeed("late".to_string().into());

    assert_eq!(exactly_one(rx).unwrap().expose_secret(), "late");
}

#[test]
fn test_past_expiry_rejected_synchronously() {
    let (transport, handle) = handle_with(RefreshBehavior::Succeed("rotated".into()));
    let (tx, rx) = mpsc::channel::<RefreshOutcome>();

    let past = OffsetDateTime::now_utc() - Duration::minutes(5);
    let result = handle.refresh_access_token(past, move |outcome| {
        tx.send(outcome).unwrap();
    });

    assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
    assert_eq!(transport.submission_count(), 0);
    // Completion was dropped unused, never invoked
    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn test_unix_timestamp_expiry_is_forwarded() {
    let (transport, handle) = handle_with(RefreshBehavior::Succeed("rotated".into()));
    let target = OffsetDateTime::now_utc().unix_timestamp() + 3600;
    let expiry = expiry_from_unix_timestamp(target).unwrap();

    let (tx, rx) = mpsc::channel();
    handle
        .refresh_access_token(expiry, move |outcome| tx.send(outcome).unwrap())
        .unwrap();
    exactly_one(rx).unwrap();

    assert_eq!(transport.last_expiry().unwrap().unix_timestamp(), target);
}

#[tokio::test]
async fn test_async_refresh_success() {
    let (_transport, handle) = handle_with(RefreshBehavior::Succeed("async-token".into()));

    let token = handle.refresh_access_token_async(in_one_hour()).await.unwrap();
    assert_eq!(token.expose_secret(), "async-token");
}

#[tokio::test]
async fn test_async_refresh_dropped_completion() {
    let (_transport, handle) = handle_with(RefreshBehavior::Drop);

    let err = handle
        .refresh_access_token_async(in_one_hour())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::RefreshFailed(_)));
}

#[tokio::test]
async fn test_async_refresh_past_expiry() {
    let (transport, handle) = handle_with(RefreshBehavior::Succeed("unused".into()));

    let err = handle
        .refresh_access_token_async(OffsetDateTime::now_utc() - Duration::seconds(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidArgument(_)));
    assert_eq!(transport.submission_count(), 0);
}
