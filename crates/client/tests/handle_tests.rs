//! Ownership tests for `ConfigHandle` through the public API.
//!
//! These tests verify that the transport resource is released exactly once
//! no matter how the handle travels before it is dropped.

use std::sync::Arc;
use std::thread;

use openapi_client::testing::MockTransport;
use openapi_client::{ClientError, ConfigHandle, ConfigLoader, ResourceToken, ValidatedParams};

fn params() -> ValidatedParams {
    ConfigLoader::from_credentials("app-key", "app-secret", "access-token")
        .build()
        .expect("explicit credentials are valid")
}

/// Stand-in for a transport component that only borrows the resource.
fn resource_id(view: &ResourceToken) -> u64 {
    view.id()
}

#[test]
fn test_moved_handle_releases_once() {
    let transport = Arc::new(MockTransport::new());
    let first = ConfigHandle::new(params(), transport.clone()).unwrap();
    let id = first.resource().id();

    // Move through a function boundary and a collection
    let second = std::convert::identity(first);
    let mut owners = vec![second];
    assert_eq!(transport.release_count(), 0);

    let last = owners.pop().unwrap();
    drop(owners);
    assert_eq!(transport.release_count(), 0);

    drop(last);
    assert_eq!(transport.released_ids(), vec![id]);
}

#[test]
fn test_each_handle_releases_its_own_resource() {
    let transport = Arc::new(MockTransport::new());
    let a = ConfigHandle::new(params(), transport.clone()).unwrap();
    let b = ConfigHandle::new(params(), transport.clone()).unwrap();
    let (a_id, b_id) = (a.resource().id(), b.resource().id());
    assert_ne!(a_id, b_id);
    assert_eq!(transport.created_count(), 2);

    drop(b);
    drop(a);
    assert_eq!(transport.released_ids(), vec![b_id, a_id]);
}

#[test]
fn test_handle_moved_to_another_thread_releases_there() {
    let transport = Arc::new(MockTransport::new());
    let handle = ConfigHandle::new(params(), transport.clone()).unwrap();

    thread::spawn(move || drop(handle)).join().unwrap();
    assert_eq!(transport.release_count(), 1);
}

#[test]
fn test_borrowed_views_are_shared_across_threads() {
    let transport = Arc::new(MockTransport::new());
    let handle = ConfigHandle::new(params(), transport.clone()).unwrap();
    let expected = handle.resource().id();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(resource_id(handle.as_ref()), expected);
                assert_eq!(handle.params().credentials().app_key(), "app-key");
            });
        }
    });

    assert_eq!(transport.release_count(), 0);
    drop(handle);
    assert_eq!(transport.release_count(), 1);
}

#[test]
fn test_rejected_parameters_create_nothing() {
    let transport = Arc::new(MockTransport::new().rejecting("app key disabled"));
    let result = ConfigHandle::new(params(), transport.clone());

    match result {
        Err(ClientError::ResourceCreationFailed(e)) => {
            assert!(e.to_string().contains("app key disabled"));
        }
        other => panic!("expected ResourceCreationFailed, got {other:?}"),
    }
    assert_eq!(transport.created_count(), 0);
    assert_eq!(transport.release_count(), 0);
}
