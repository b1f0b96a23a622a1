//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the inference-service monitor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// The service under observation.
    pub service: ServiceConfig,

    /// Sampling behaviour (timeout, sample count, probe payload).
    pub monitoring: MonitoringConfig,

    /// Warning/critical levels per tracked metric, keyed by metric name.
    pub thresholds: HashMap<String, ThresholdLevels>,
}

/// Identity of the monitored service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the prediction service (e.g., "http://127.0.0.1:8000").
    pub base_url: String,
}

/// Sampling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitoringConfig {
    /// Per-request timeout in seconds, applied to both probes.
    pub request_timeout_seconds: f64,

    /// Number of probe iterations per run (default: 1).
    #[serde(default = "default_samples_per_check")]
    pub samples_per_check: u32,

    /// Local image uploaded by the predict probe.
    #[serde(default = "default_probe_image_path")]
    pub probe_image_path: PathBuf,
}

fn default_samples_per_check() -> u32 {
    1
}

fn default_probe_image_path() -> PathBuf {
    PathBuf::from("img.jpg")
}

/// Warning and critical levels for one metric.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ThresholdLevels {
    /// Level at or above which the metric is flagged as warning.
    pub warning: f64,

    /// Level at or above which the metric is flagged as critical.
    pub critical: f64,
}
