//! Pulmorisk: Lung cancer risk prediction over exported classifier artifacts.
//!
//! CLI front-end: loads the artifact trio, predicts for one record or a
//! batch read from a JSON file, prints results to stdout and optionally
//! records prediction events in a SQLite monitoring database.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pulmorisk::adapters::{load_artifacts, SqliteMonitor};
use pulmorisk::ports::{Monitor, PredictionEvent};
use pulmorisk::{PatientRecord, PredictionResult, PredictionService};

#[derive(Debug, Parser)]
#[command(name = "pulmorisk", version, about = "Lung cancer risk prediction")]
struct Cli {
    /// Directory containing model.json, scaler.json and features.txt
    #[arg(long, value_name = "DIR")]
    artifacts: PathBuf,

    /// Patient record JSON file; a top-level array is treated as a batch
    input: PathBuf,

    /// Record prediction events in this SQLite database
    #[arg(long, value_name = "PATH")]
    monitor_db: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let artifacts = load_artifacts(&cli.artifacts)
        .with_context(|| format!("loading artifacts from {}", cli.artifacts.display()))?;
    let classifier = Arc::new(artifacts.classifier);
    let model_version = classifier
        .model_version()
        .map(str::to_string)
        .unwrap_or_else(|_| "unknown".to_string());

    let service = PredictionService::new(
        artifacts.manifest,
        Arc::new(artifacts.scaler),
        Arc::clone(&classifier),
    )?;

    let monitor = match &cli.monitor_db {
        Some(path) => Some(
            SqliteMonitor::new(path)
                .with_context(|| format!("opening monitor db {}", path.display()))?,
        ),
        None => None,
    };

    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let parsed: serde_json::Value = serde_json::from_str(&input)
        .with_context(|| format!("parsing {}", cli.input.display()))?;

    if parsed.is_array() {
        let patients: Vec<PatientRecord> =
            serde_json::from_value(parsed).context("parsing patient batch")?;

        let started = Instant::now();
        let results = service.predict_batch(&patients)?;
        let latency_ms = per_record_latency(started, results.len());

        for (patient, result) in patients.iter().zip(&results) {
            log_event(monitor.as_ref(), patient, result, &model_version, latency_ms);
        }

        let output = serde_json::json!({
            "predictions": results,
            "count": results.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let patient: PatientRecord =
            serde_json::from_value(parsed).context("parsing patient record")?;

        let started = Instant::now();
        let result = service.predict(&patient)?;
        let latency_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            "prediction complete: prediction={}, confidence={:.2}%",
            result.prediction,
            result.confidence * 100.0
        );
        log_event(monitor.as_ref(), &patient, &result, &model_version, latency_ms);

        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn per_record_latency(started: Instant, count: usize) -> u64 {
    if count == 0 {
        0
    } else {
        started.elapsed().as_millis() as u64 / count as u64
    }
}

/// Event logging is the caller's job, not the pipeline's; a monitor failure
/// never fails the prediction.
fn log_event(
    monitor: Option<&SqliteMonitor>,
    patient: &PatientRecord,
    result: &PredictionResult,
    model_version: &str,
    latency_ms: u64,
) {
    let Some(monitor) = monitor else {
        return;
    };

    let event = PredictionEvent {
        patient: patient.clone(),
        prediction: result.prediction,
        probabilities: result.probabilities.clone(),
        model_version: model_version.to_string(),
        latency_ms,
        created_at: result.created_at,
    };

    if let Err(e) = monitor.log_prediction(&event) {
        tracing::warn!("failed to log prediction event: {e}");
    }
}
