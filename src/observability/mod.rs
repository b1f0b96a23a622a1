//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! sampling loop produces:
//!     → console.rs (color-coded per-metric lines)
//!     → sinks.rs (metrics.jsonl, one snapshot per line)
//!     → tracing events (structured log of raw probe outcomes)
//! ```
//!
//! # Design Decisions
//! - Sinks are constructed explicitly and passed into the loop; no
//!   module-level handler state
//! - tracing-subscriber is initialized once in main with an EnvFilter

pub mod console;
pub mod sinks;

pub use console::Console;
pub use sinks::{MetricsSink, SinkError};
