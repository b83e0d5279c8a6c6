//! Admission control subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler
//!     → pool.rs try_permit() (soft limit check)
//!     → permit.rs Permit held across the store call
//!     → Permit dropped → pool.rs release()
//!
//! Health probe
//!     → pool.rs is_healthy() (hard limit check, no permit taken)
//! ```
//!
//! # Design Decisions
//! - One process-wide pool, shared via Arc, never a global
//! - Rejection is immediate: no queueing, no backoff
//! - The lock never spans the downstream call

pub mod permit;
pub mod pool;

pub use permit::Permit;
pub use pool::{PoolSnapshot, ResourcePool};
