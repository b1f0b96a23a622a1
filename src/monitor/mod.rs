//! Monitoring core: sampling loop, aggregate metrics, threshold bands.
//!
//! # Data Flow
//! ```text
//! sampler.rs (loop)
//!     → probe client (health, timed predict)
//!     → metrics.rs (p95 over run history, error rate)
//!     → thresholds.rs (severity band per metric)
//!     → observability sinks (console, metrics.jsonl, tracing events)
//! ```

pub mod metrics;
pub mod sampler;
pub mod thresholds;

use thiserror::Error;

pub use sampler::{MetricSnapshot, RunState, RunSummary, Sampler};
pub use thresholds::{Severity, ThresholdTable};

/// Fatal errors that end a monitoring run.
///
/// Probe failures are not represented here; they are contained by the loop
/// and recorded as failed samples.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Threshold(#[from] thresholds::UnknownMetric),

    #[error(transparent)]
    Sink(#[from] crate::observability::SinkError),
}
