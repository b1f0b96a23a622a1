//! Probe subsystem: the HTTP client side of the monitor.

pub mod client;

pub use client::{ProbeClient, ProbeError};
