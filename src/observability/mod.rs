//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the admission pool produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached by the HTTP layer and shows up in
//!   tower-http trace spans
//! - Metrics are cheap and silently dropped when no recorder is installed

pub mod logging;
pub mod metrics;
