//! Failure injection: broken stores, slow stores and abandoned requests.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

mod common;

use common::{get, server_with, MemoryStore, StallingStore};

#[tokio::test]
async fn store_failure_returns_500_and_releases_permit() {
    let store = Arc::new(MemoryStore::failing());
    let server = server_with(store.clone(), |_| {});
    let pool = server.pool();

    let (status, body, _) = get(server.router(), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        "500 - Error due to redis cluster broken!\ncommand failed: CLUSTERDOWN The cluster is down"
    );
    assert_eq!(store.calls(), 1);
    assert_eq!(pool.allocated(), 0, "permit must be released on the error path");
}

#[tokio::test]
async fn repeated_store_failures_do_not_leak_permits() {
    let store = Arc::new(MemoryStore::failing());
    let server = server_with(store.clone(), |_| {});

    for _ in 0..100 {
        let (status, _, _) = get(server.router(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    assert_eq!(store.calls(), 100);
    assert_eq!(server.pool().allocated(), 0);
}

#[tokio::test]
async fn store_timeout_returns_500() {
    let store = Arc::new(StallingStore::default());
    let server = server_with(store.clone(), |config| {
        config.store.timeout_ms = 50;
    });

    let (status, body, _) = get(server.router(), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.ends_with("timed out after 50ms"), "body was {body:?}");
    assert_eq!(store.entered.load(Ordering::SeqCst), 1);
    assert_eq!(server.pool().allocated(), 0);
}

#[tokio::test]
async fn store_deadline_fires_before_request_deadline() {
    let store = Arc::new(StallingStore::default());
    let server = server_with(store.clone(), |config| {
        config.timeouts.request_secs = 1;
        config.store.timeout_ms = 200;
    });

    let (status, body, _) = get(server.router(), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.ends_with("timed out after 200ms"), "body was {body:?}");
    assert_eq!(server.pool().allocated(), 0);
}

#[tokio::test]
async fn abandoned_request_releases_permit() {
    let store = Arc::new(StallingStore::default());
    let server = server_with(store.clone(), |_| {});
    let pool = server.pool();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let in_flight = server.router().oneshot(request);
    let outcome = tokio::time::timeout(Duration::from_millis(100), in_flight).await;

    assert!(outcome.is_err(), "stalled request should still be pending");
    assert_eq!(store.entered.load(Ordering::SeqCst), 1);
    assert_eq!(pool.allocated(), 0, "dropping the request future releases its permit");
}

#[tokio::test]
async fn health_stays_ok_while_store_is_down() {
    let server = server_with(Arc::new(MemoryStore::failing()), |_| {});

    let (status, _, _) = get(server.router(), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body, _) = get(server.router(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ok");
}
