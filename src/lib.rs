//! infermon: health and latency monitor for an ML inference service.
//!
//! # Architecture Overview
//!
//! ```text
//! config file (TOML)
//!     → config (schema, loader, validation)
//!     → probe (reqwest client: GET /health, POST /predict multipart)
//!     → monitor (sampling loop, p95 over run history, threshold bands)
//!     → observability (colored console, metrics.jsonl sink, tracing events)
//! ```
//!
//! The loop is single-threaded and strictly sequential: each iteration
//! blocks on the health probe, then the timed predict probe, then emits one
//! metric snapshot. There is no retry, no backoff, and no sleep between
//! iterations.

pub mod config;
pub mod monitor;
pub mod observability;
pub mod probe;

pub use config::{load_config, MonitorConfig};
pub use monitor::{RunSummary, Sampler, ThresholdTable};
pub use observability::{Console, MetricsSink};
pub use probe::{ProbeClient, ProbeError};
