//! Route handlers: the hit counter and the health probe.

use std::time::Instant;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::error::{HitError, Result, POOL_EXHAUSTED};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::store::StoreError;

/// Admit the request, bump the shared counter, render the greeting.
pub async fn hit(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    tracing::info!(path = %uri.path(), "Serving request");

    let response = match count_hit(&state).await {
        Ok(count) => format!("I have been hit [{}] times since deployment!", count).into_response(),
        Err(err) => {
            match &err {
                HitError::Saturated => {
                    tracing::debug!(pool = ?state.pool.snapshot(), "Request rejected at soft limit");
                    metrics::record_rejection();
                }
                HitError::Store(e) => {
                    tracing::error!(error = %e, "Counter increment failed");
                    metrics::record_store_error(e.kind());
                }
            }
            err.into_response()
        }
    };

    metrics::record_request("hit", response.status().as_u16(), start);
    response
}

async fn count_hit(state: &AppState) -> Result<i64> {
    let _permit = state.pool.try_permit().ok_or(HitError::Saturated)?;

    let count = tokio::time::timeout(state.store_timeout, state.store.increment(&state.counter_key))
        .await
        .map_err(|_| StoreError::Timeout(state.store_timeout))??;

    Ok(count)
}

/// Liveness/readiness probe. Reads pool state only.
pub async fn healthz(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    tracing::info!(path = %uri.path(), "Serving healthcheck");

    let response = if state.pool.is_healthy() {
        (StatusCode::OK, "Ok").into_response()
    } else {
        tracing::warn!(pool = ?state.pool.snapshot(), "Pool at capacity, reporting unhealthy");
        (StatusCode::SERVICE_UNAVAILABLE, POOL_EXHAUSTED).into_response()
    };

    metrics::record_request("healthz", response.status().as_u16(), start);
    response
}
