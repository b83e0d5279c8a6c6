//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges. Every violation is
//! reported, not just the first one.

use thiserror::Error;

use crate::config::schema::{AppConfig, StoreMode};

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("pool.capacity must be greater than zero")]
    ZeroCapacity,

    #[error("pool.soft_limit_fraction must be in (0, 1], got {0}")]
    SoftLimitFraction(f64),

    #[error("store.nodes must list at least one address")]
    NoStoreNodes,

    #[error("store.nodes must hold exactly one address in standalone mode, got {0}")]
    StandaloneNodeCount(usize),

    #[error("store.counter_key must not be empty")]
    EmptyCounterKey,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "store.timeout_ms ({store_ms}) must be below timeouts.request_secs ({request_secs}s)"
    )]
    StoreTimeoutNotBelowRequest { store_ms: u64, request_secs: u64 },
}

/// Check a configuration before it is accepted into the system.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.pool.capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    let fraction = config.pool.soft_limit_fraction;
    if !(fraction > 0.0 && fraction <= 1.0) {
        errors.push(ValidationError::SoftLimitFraction(fraction));
    }

    match (config.store.mode, config.store.nodes.len()) {
        (_, 0) => errors.push(ValidationError::NoStoreNodes),
        (StoreMode::Standalone, n) if n > 1 => {
            errors.push(ValidationError::StandaloneNodeCount(n));
        }
        _ => {}
    }

    if config.store.counter_key.is_empty() {
        errors.push(ValidationError::EmptyCounterKey);
    }

    if config.store.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("store.timeout_ms"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    // The request timeout layer would otherwise cancel a hung store call
    // before the store deadline maps it to a 500.
    let store_ms = config.store.timeout_ms;
    let request_secs = config.timeouts.request_secs;
    if store_ms > 0 && request_secs > 0 && store_ms >= request_secs.saturating_mul(1000) {
        errors.push(ValidationError::StoreTimeoutNotBelowRequest {
            store_ms,
            request_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
