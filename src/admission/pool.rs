//! Bounded in-flight counter with a soft admission limit and a hard health limit.
//!
//! # Thresholds
//! ```text
//! 0 ───────────── soft limit ───────── capacity
//!   try_acquire ok │ try_acquire fails  │
//!   is_healthy ok                       │ is_healthy fails
//! ```
//!
//! The soft limit is `capacity * soft_limit_fraction` evaluated in floating
//! point, so a fractional limit such as 7.5 admits up to 8 permits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::admission::permit::Permit;
use crate::config::PoolConfig;
use crate::observability::metrics;

/// Point-in-time copy of pool state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub soft_limit: f64,
    pub allocated: usize,
}

/// Admission-control pool guarding calls to the counter store.
///
/// A single mutex guards `allocated`; every operation holds it only for its
/// own O(1) body and never across an await point.
#[derive(Debug)]
pub struct ResourcePool {
    capacity: usize,
    soft_limit_fraction: f64,
    allocated: Mutex<usize>,
}

impl ResourcePool {
    /// Create an empty pool.
    pub fn new(capacity: usize, soft_limit_fraction: f64) -> Self {
        Self {
            capacity,
            soft_limit_fraction,
            allocated: Mutex::new(0),
        }
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.capacity, config.soft_limit_fraction)
    }

    // The counter is updated in a single step, so a poisoned lock still holds
    // a consistent value.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.allocated.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take a permit if fewer than `soft_limit()` are held.
    pub fn try_acquire(&self) -> bool {
        let mut allocated = self.lock();
        if (*allocated as f64) < self.soft_limit() {
            *allocated += 1;
            metrics::set_pool_allocated(*allocated);
            true
        } else {
            false
        }
    }

    /// Return a permit taken with [`try_acquire`](Self::try_acquire).
    ///
    /// Must be called exactly once per successful acquire. A release with
    /// nothing allocated is ignored and logged.
    pub fn release(&self) {
        let mut allocated = self.lock();
        match allocated.checked_sub(1) {
            Some(remaining) => {
                *allocated = remaining;
                metrics::set_pool_allocated(remaining);
            }
            None => {
                tracing::warn!(capacity = self.capacity, "Pool release without matching acquire");
            }
        }
    }

    /// True while fewer than `capacity` permits are held.
    pub fn is_healthy(&self) -> bool {
        *self.lock() < self.capacity
    }

    /// Scoped acquisition: the returned permit releases itself on drop.
    pub fn try_permit(self: &Arc<Self>) -> Option<Permit> {
        if self.try_acquire() {
            Some(Permit::new(Arc::clone(self)))
        } else {
            None
        }
    }

    pub fn allocated(&self) -> usize {
        *self.lock()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn soft_limit(&self) -> f64 {
        self.capacity as f64 * self.soft_limit_fraction
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            capacity: self.capacity,
            soft_limit: self.soft_limit(),
            allocated: self.allocated(),
        }
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::from_config(&PoolConfig::default())
    }
}
