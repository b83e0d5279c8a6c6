//! Counter store subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler (permit held)
//!     → CounterStore::increment(key)
//!     → redis.rs (INCR against cluster or single node)
//!     → post-increment value
//! ```
//!
//! # Design Decisions
//! - Handlers see only the trait, so tests swap in in-memory stores
//! - No retries here; a failed increment is terminal for the request
//! - Connection is established on first use, not at startup

pub mod redis;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use self::redis::RedisStore;

/// Errors surfaced by a counter store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not build a client or open a connection.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The store rejected or failed the command.
    #[error("command failed: {0}")]
    Command(String),

    /// The round-trip exceeded the configured deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connect(_) => "connect",
            StoreError::Command(_) => "command",
            StoreError::Timeout(_) => "timeout",
        }
    }
}

/// A shared counter supporting atomic increment-and-return.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the integer at `key` by one and return the new value.
    async fn increment(&self, key: &str) -> Result<i64, StoreError>;
}
