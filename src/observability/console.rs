//! Human-readable console output.
//!
//! # Responsibilities
//! - Print raw probe outcomes per iteration
//! - Print one line per metric, colored by severity band
//!
//! # Design Decisions
//! - Colors are plain ANSI escapes, disabled when stdout is not a terminal

use std::io::IsTerminal;

use serde_json::Value;

use crate::monitor::thresholds::Severity;
use crate::probe::ProbeError;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Color-coded console renderer for probe outcomes and metric lines.
pub struct Console {
    color: bool,
}

impl Console {
    /// Renderer for stdout, with color when attached to a terminal.
    pub fn stdout() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Renderer with color disabled (tests, piped output).
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn health(&self, status: &Value) {
        println!("HEALTH: {}", status);
    }

    pub fn predict(&self, outcome: &Result<Value, ProbeError>) {
        match outcome {
            Ok(payload) => println!("PREDICT: {}", payload),
            Err(e) => println!("PREDICT failed: {}", e),
        }
        println!();
    }

    pub fn metric(&self, name: &str, value: f64, severity: Severity) {
        if self.color {
            println!("{}{}: {:.2}{}", self.paint(severity), name, value, RESET);
        } else {
            println!("{}: {:.2}", name, value);
        }
    }

    fn paint(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Ok => GREEN,
            Severity::Warning => YELLOW,
            Severity::Critical => RED,
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}
