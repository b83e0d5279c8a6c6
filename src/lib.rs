//! Hit counter service library.
//!
//! An HTTP service that increments a shared Redis counter on every request,
//! behind an in-process admission pool that sheds load at a soft limit and
//! reports unhealthy at a hard limit.

pub mod admission;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use admission::{Permit, ResourcePool};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{CounterStore, StoreError};
