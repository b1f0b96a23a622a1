//! Metric log sink.
//!
//! # Responsibilities
//! - Append one JSON line per iteration to the metrics file
//! - Stamp each record with a UTC ISO-8601 timestamp
//!
//! # Design Decisions
//! - The sink is explicitly constructed and owned by the caller; there is
//!   no module-level logging state
//! - Every record is flushed as it is written so a crashed run keeps the
//!   lines emitted so far

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::monitor::sampler::MetricSnapshot;

/// Error type for metric sink I/O.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open metrics file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot append metrics record: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot serialize metrics record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only JSONL sink for per-iteration metric snapshots.
pub struct MetricsSink {
    writer: BufWriter<File>,
}

impl MetricsSink {
    /// Open (or create) the metrics file in append mode, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| SinkError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one snapshot as a JSON line with an added `timestamp` field.
    pub fn record(&mut self, snapshot: &MetricSnapshot) -> Result<(), SinkError> {
        let mut value = serde_json::to_value(snapshot)?;
        value["timestamp"] = Value::String(
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        );

        writeln!(self.writer, "{}", value)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> MetricSnapshot {
        MetricSnapshot {
            response_time_ms: 12.5,
            p95_latency_ms: 48.0,
            error_rate_percent: 0.0,
            consecutive_failures: 0,
            health_status: json!({"status": "ok"}),
        }
    }

    #[test]
    fn test_record_appends_jsonl_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");

        let mut sink = MetricsSink::open(&path).unwrap();
        sink.record(&snapshot()).unwrap();
        sink.record(&snapshot()).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        for line in lines {
            let value: Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["response_time_ms"], 12.5);
            assert_eq!(value["health_status"]["status"], "ok");
            let ts = value["timestamp"].as_str().unwrap();
            assert!(ts.ends_with('Z'));
        }
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/metrics.jsonl");

        let mut sink = MetricsSink::open(&path).unwrap();
        sink.record(&snapshot()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");

        {
            let mut sink = MetricsSink::open(&path).unwrap();
            sink.record(&snapshot()).unwrap();
        }
        {
            let mut sink = MetricsSink::open(&path).unwrap();
            sink.record(&snapshot()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
