//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig::default()
//!     → loader.rs (optional TOML file named by HIT_COUNTER_CONFIG)
//!     → PORT / --port override
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, CONFIG_PATH_ENV};
pub use schema::{
    AppConfig, ListenerConfig, LogFormat, ObservabilityConfig, PoolConfig, StoreConfig, StoreMode,
    TimeoutConfig,
};
pub use validation::ValidationError;
