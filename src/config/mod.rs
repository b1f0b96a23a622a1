//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → handed to probe client and sampling loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - samples_per_check and the probe image path default; everything else is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{MonitorConfig, MonitoringConfig, ServiceConfig, ThresholdLevels};
