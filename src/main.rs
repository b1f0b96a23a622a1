//! infermon binary: load config, probe the service, report.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use uuid::Uuid;

use infermon::config::load_config;
use infermon::monitor::{Sampler, ThresholdTable};
use infermon::observability::MetricsSink;
use infermon::probe::ProbeClient;

#[derive(Parser)]
#[command(name = "infermon")]
#[command(about = "Health and latency monitor for an ML inference service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "infermon.toml")]
    config: PathBuf,

    /// Override samples_per_check from the config.
    #[arg(short, long)]
    samples: Option<u32>,

    /// Metrics JSONL output file.
    #[arg(long, default_value = "logs/metrics.jsonl")]
    metrics_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infermon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let samples = cli.samples.unwrap_or(config.monitoring.samples_per_check);
    let run_id = Uuid::new_v4();

    tracing::info!(
        run_id = %run_id,
        base_url = %config.service.base_url,
        samples,
        timeout_secs = config.monitoring.request_timeout_seconds,
        "configuration loaded"
    );

    // Already validated by the loader.
    let base_url = Url::parse(&config.service.base_url)?;
    let timeout = Duration::from_secs_f64(config.monitoring.request_timeout_seconds);

    let probe = ProbeClient::new(base_url, timeout, config.monitoring.probe_image_path.clone())?;
    let thresholds = ThresholdTable::from(config.thresholds);

    let mut sink = MetricsSink::open(&cli.metrics_file)?;
    let mut sampler = Sampler::new(probe, thresholds, samples, run_id);

    let summary = sampler.run(&mut sink).await?;

    tracing::info!(
        run_id = %run_id,
        error_rate_percent = summary.error_rate_percent,
        consecutive_failures = summary.consecutive_failures,
        "shutdown complete"
    );
    Ok(())
}
