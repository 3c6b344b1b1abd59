//! Monitor port: Trait for the prediction-event log.
//!
//! Monitoring is a caller-side concern: the prediction pipeline itself never
//! writes events. Front-ends (CLI, API handlers) record an event after each
//! successful prediction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PatientRecord, RiskLevel};

/// One recorded prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEvent {
    /// The raw input the prediction was made from
    pub patient: PatientRecord,

    /// Predicted risk level
    pub prediction: RiskLevel,

    /// Per-class probability at prediction time
    pub probabilities: BTreeMap<String, f64>,

    /// Version string of the model artifact that served the request
    pub model_version: String,

    /// End-to-end prediction latency in milliseconds
    pub latency_ms: u64,

    /// Timestamp of the event
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for prediction-event storage.
pub trait Monitor: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append one prediction event.
    ///
    /// # Errors
    /// Returns error if the storage operation fails.
    fn log_prediction(&self, event: &PredictionEvent) -> Result<(), Self::Error>;

    /// Load the most recent events, newest first, up to `limit`.
    ///
    /// # Errors
    /// Returns error if the storage operation fails.
    fn recent_events(&self, limit: usize) -> Result<Vec<PredictionEvent>, Self::Error>;

    /// Total number of recorded events.
    ///
    /// # Errors
    /// Returns error if the storage operation fails.
    fn count_events(&self) -> Result<usize, Self::Error>;
}
