//! Shared fakes and helpers for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tokio::sync::Semaphore;
use tower::ServiceExt;

use hit_counter::config::AppConfig;
use hit_counter::{CounterStore, HttpServer, StoreError};

/// In-memory counter that can be switched into a failing state.
/// Records every key it is asked to increment.
#[derive(Default)]
pub struct MemoryStore {
    value: AtomicI64,
    calls: AtomicUsize,
    failing: AtomicBool,
    keys: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(key.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Command("CLUSTERDOWN The cluster is down".into()));
        }
        Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Store whose increments never complete.
#[derive(Default)]
pub struct StallingStore {
    pub entered: AtomicUsize,
}

#[async_trait]
impl CounterStore for StallingStore {
    async fn increment(&self, _key: &str) -> Result<i64, StoreError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Store that parks every increment until the test opens the gate.
pub struct GatedStore {
    pub entered: AtomicUsize,
    gate: Semaphore,
    value: AtomicI64,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            entered: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            value: AtomicI64::new(0),
        }
    }

    pub fn open(&self, n: usize) {
        self.gate.add_permits(n);
    }
}

#[async_trait]
impl CounterStore for GatedStore {
    async fn increment(&self, _key: &str) -> Result<i64, StoreError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        permit.forget();
        Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Build a server around `store` with an optional config tweak.
pub fn server_with<S>(store: Arc<S>, tweak: impl FnOnce(&mut AppConfig)) -> HttpServer
where
    S: CounterStore + 'static,
{
    let mut config = AppConfig::default();
    tweak(&mut config);
    HttpServer::new(config, store)
}

/// Drive one GET request through the router without a socket.
pub async fn get(router: Router, path: &str) -> (StatusCode, String, HeaderMap) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap(), headers)
}
