//! Startup orchestration.
//!
//! Order: metrics exporter, store client, listener, then serve. Any failure
//! before serving is fatal.

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::store::{RedisStore, StoreError};

/// Errors that abort the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid metrics address {0:?}: {1}")]
    MetricsAddress(String, #[source] AddrParseError),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to initialise store client: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {0}: {1}")]
    Bind(String, #[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bring up every subsystem and serve until SIGINT/SIGTERM.
pub async fn launch(config: AppConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr: SocketAddr = address
            .parse()
            .map_err(|e| StartupError::MetricsAddress(address.clone(), e))?;
        metrics::init_metrics(addr)?;
    }

    let store = RedisStore::from_config(&config.store)?;
    tracing::info!(
        mode = ?store.mode(),
        nodes = ?config.store.nodes,
        key = %config.store.counter_key,
        "Counter store configured"
    );

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| StartupError::Bind(address.clone(), e))?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_task = shutdown.trigger_on_signal();

    HttpServer::new(config, Arc::new(store))
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
