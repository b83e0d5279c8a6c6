//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and every
//! section falls back to its defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the hit counter service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Admission pool sizing.
    pub pool: PoolConfig,

    /// Counter store connection settings.
    pub store: StoreConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by `PORT` / `--port`.
    pub port: u16,
}

impl ListenerConfig {
    /// Address string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Admission pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Hard limit on in-flight permits; the health probe fails at this count.
    pub capacity: usize,

    /// Fraction of capacity at which new requests are rejected.
    pub soft_limit_fraction: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            soft_limit_fraction: 0.9,
        }
    }
}

/// How the store nodes are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Redis Cluster; `nodes` are seed addresses.
    #[default]
    Cluster,
    /// A single Redis server; `nodes` holds exactly one address.
    Standalone,
}

/// Counter store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Cluster or single node.
    pub mode: StoreMode,

    /// Redis URLs (e.g., "redis://redis-cluster:6379").
    pub nodes: Vec<String>,

    /// Allow reads to be served by replicas (cluster mode only).
    pub read_from_replicas: bool,

    /// Key incremented on every admitted request.
    pub counter_key: String,

    /// Upper bound on a single increment round-trip, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::Cluster,
            nodes: vec!["redis://redis-cluster:6379".to_string()],
            read_from_replicas: true,
            counter_key: "hits".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
