//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the counter and health handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admission::ResourcePool;
use crate::config::AppConfig;
use crate::http::handlers::{healthz, hit};
use crate::store::CounterStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ResourcePool>,
    pub store: Arc<dyn CounterStore>,
    pub counter_key: Arc<str>,
    pub store_timeout: Duration,
}

/// HTTP server for the hit counter.
pub struct HttpServer {
    router: Router,
    pool: Arc<ResourcePool>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: AppConfig, store: Arc<dyn CounterStore>) -> Self {
        let pool = Arc::new(ResourcePool::from_config(&config.pool));

        let state = AppState {
            pool: Arc::clone(&pool),
            store,
            counter_key: Arc::from(config.store.counter_key.as_str()),
            store_timeout: Duration::from_millis(config.store.timeout_ms),
        };

        let router = Self::build_router(&config, state);
        Self { router, pool }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", any(healthz))
            .route("/", any(hit))
            .route("/{*path}", any(hit))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until a value arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            port = addr.port(),
            capacity = self.pool.capacity(),
            soft_limit = self.pool.soft_limit(),
            "Server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The admission pool shared by all handlers.
    pub fn pool(&self) -> Arc<ResourcePool> {
        Arc::clone(&self.pool)
    }
}
