//! The sampling loop.
//!
//! # Responsibilities
//! - Drive a fixed number of health + predict probe iterations
//! - Accumulate latency samples and run-state counters
//! - Classify each tracked metric and emit a snapshot per iteration
//!
//! # Design Decisions
//! - Iterations run back-to-back; the only suspension points are the two
//!   network calls
//! - Probe failures are contained: a failed or malformed predict response
//!   is recorded as a failed sample, never a crash
//! - When the service-reported timing field is absent the measured
//!   wall-clock latency stands in for response_time_ms

use std::time::Instant;

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::monitor::metrics;
use crate::monitor::thresholds::{
    Severity, ThresholdTable, CONSECUTIVE_FAILURES, ERROR_RATE_PERCENT, P95_LATENCY_MS,
    RESPONSE_TIME_MS,
};
use crate::monitor::MonitorError;
use crate::observability::{Console, MetricsSink};
use crate::probe::ProbeClient;

/// Mutable per-run counters, owned exclusively by the loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunState {
    pub total_requests: u64,
    pub error_count: u64,
    pub consecutive_failures: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A predict call succeeded: the failure streak ends here.
    pub fn record_success(&mut self) {
        self.total_requests += 1;
        self.consecutive_failures = 0;
    }

    /// A predict call failed (transport error, bad status, or a payload
    /// without a truthy `success`).
    pub fn record_failure(&mut self) {
        self.total_requests += 1;
        self.error_count += 1;
        self.consecutive_failures += 1;
    }

    pub fn error_rate_percent(&self) -> f64 {
        metrics::error_rate_percent(self.error_count, self.total_requests)
    }
}

/// Point-in-time record handed to the sinks each iteration.
#[derive(Debug, Serialize)]
pub struct MetricSnapshot {
    pub response_time_ms: f64,
    pub p95_latency_ms: f64,
    pub error_rate_percent: f64,
    pub consecutive_failures: u64,
    pub health_status: Value,
}

/// What a completed run looked like in aggregate.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub total_requests: u64,
    pub error_count: u64,
    pub consecutive_failures: u64,
    pub error_rate_percent: f64,
    pub p95_latency_ms: f64,
}

/// Sequential sampling loop over the monitored service.
pub struct Sampler {
    probe: ProbeClient,
    thresholds: ThresholdTable,
    samples_per_check: u32,
    run_id: Uuid,
    console: Console,
    latencies: Vec<f64>,
    state: RunState,
}

impl Sampler {
    pub fn new(
        probe: ProbeClient,
        thresholds: ThresholdTable,
        samples_per_check: u32,
        run_id: Uuid,
    ) -> Self {
        Self {
            probe,
            thresholds,
            samples_per_check,
            run_id,
            console: Console::stdout(),
            latencies: Vec::new(),
            state: RunState::new(),
        }
    }

    /// Replace the console renderer (tests use a plain one).
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Run the configured number of iterations, emitting one snapshot each.
    pub async fn run(&mut self, sink: &mut MetricsSink) -> Result<RunSummary, MonitorError> {
        tracing::info!(
            run_id = %self.run_id,
            samples = self.samples_per_check,
            "monitoring run starting"
        );

        for iteration in 0..self.samples_per_check {
            self.step(iteration, sink).await?;
        }

        let summary = self.summary();
        tracing::info!(
            run_id = %self.run_id,
            total_requests = summary.total_requests,
            error_count = summary.error_count,
            p95_latency_ms = summary.p95_latency_ms,
            "monitoring run complete"
        );
        Ok(summary)
    }

    /// One probe iteration: health, timed predict, metrics, classification.
    async fn step(&mut self, iteration: u32, sink: &mut MetricsSink) -> Result<(), MonitorError> {
        let health_status = match self.probe.health().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(run_id = %self.run_id, iteration, error = %e, "health probe failed");
                json!({ "error": e.to_string() })
            }
        };
        self.console.health(&health_status);

        let start = Instant::now();
        let predict = self.probe.predict().await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.latencies.push(latency_ms);

        if predict.as_ref().map(payload_succeeded).unwrap_or(false) {
            self.state.record_success();
        } else {
            self.state.record_failure();
        }

        // Event log: the raw predict outcome, structured.
        match &predict {
            Ok(payload) => {
                tracing::info!(
                    run_id = %self.run_id,
                    iteration,
                    response = %payload,
                    "predict result"
                );
            }
            Err(e) => {
                tracing::warn!(run_id = %self.run_id, iteration, error = %e, "predict probe failed");
            }
        }
        self.console.predict(&predict);

        let response_time_ms = predict
            .as_ref()
            .ok()
            .and_then(|p| p.pointer("/result/timing/total_ms"))
            .and_then(Value::as_f64)
            .unwrap_or(latency_ms);

        let p95_latency_ms = metrics::p95(&self.latencies);
        let error_rate_percent = self.state.error_rate_percent();

        let observations = [
            (RESPONSE_TIME_MS, response_time_ms),
            (P95_LATENCY_MS, p95_latency_ms),
            (ERROR_RATE_PERCENT, error_rate_percent),
            (CONSECUTIVE_FAILURES, self.state.consecutive_failures as f64),
        ];

        for (name, value) in observations {
            let severity = self.thresholds.classify(name, value)?;
            if severity != Severity::Ok {
                tracing::warn!(
                    run_id = %self.run_id,
                    metric = name,
                    value,
                    severity = ?severity,
                    "metric outside ok band"
                );
            }
            self.console.metric(name, value, severity);
        }

        sink.record(&MetricSnapshot {
            response_time_ms,
            p95_latency_ms,
            error_rate_percent,
            consecutive_failures: self.state.consecutive_failures,
            health_status,
        })?;

        Ok(())
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            total_requests: self.state.total_requests,
            error_count: self.state.error_count,
            consecutive_failures: self.state.consecutive_failures,
            error_rate_percent: self.state.error_rate_percent(),
            p95_latency_ms: metrics::p95(&self.latencies),
        }
    }
}

/// Whether a predict payload counts as a success: a JSON object with a
/// truthy `success` key.
fn payload_succeeded(payload: &Value) -> bool {
    payload.get("success").map(is_truthy).unwrap_or(false)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
