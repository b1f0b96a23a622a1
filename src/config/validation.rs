//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL actually parses as http(s)
//! - Validate value ranges (timeout > 0, sample count >= 1)
//! - Require a threshold entry for every tracked metric
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: MonitorConfig -> Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::MonitorConfig;
use crate::monitor::thresholds::TRACKED_METRICS;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("service.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("service.base_url '{url}' must use http or https")]
    UnsupportedScheme { url: String },

    #[error("monitoring.request_timeout_seconds must be positive, got {0}")]
    NonPositiveTimeout(f64),

    #[error("monitoring.samples_per_check must be at least 1")]
    ZeroSamples,

    #[error("thresholds.{0} is missing (warning/critical levels required)")]
    MissingThreshold(&'static str),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.service.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme {
                url: config.service.base_url.clone(),
            });
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::InvalidBaseUrl {
                url: config.service.base_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.monitoring.request_timeout_seconds <= 0.0 {
        errors.push(ValidationError::NonPositiveTimeout(
            config.monitoring.request_timeout_seconds,
        ));
    }

    if config.monitoring.samples_per_check == 0 {
        errors.push(ValidationError::ZeroSamples);
    }

    for metric in TRACKED_METRICS {
        if !config.thresholds.contains_key(metric) {
            errors.push(ValidationError::MissingThreshold(metric));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
