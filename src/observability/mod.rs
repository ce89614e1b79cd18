//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! renderer / middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (protocol counters)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Log level from `RUST_LOG`, falling back to config
//! - Metrics are cheap (atomic increments); a no-op without an exporter

pub mod logging;
pub mod metrics;
