//! RAII admission permit.

use std::sync::Arc;

use crate::admission::pool::ResourcePool;

/// One unit of admission held against a [`ResourcePool`].
///
/// Released exactly once when dropped, which covers early returns, errors,
/// panics and cancelled request futures alike.
#[derive(Debug)]
#[must_use = "dropping a permit releases it immediately"]
pub struct Permit {
    pool: Arc<ResourcePool>,
}

impl Permit {
    pub(crate) fn new(pool: Arc<ResourcePool>) -> Self {
        Self { pool }
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.pool.release();
        tracing::trace!(allocated = self.pool.allocated(), "Permit released");
    }
}
