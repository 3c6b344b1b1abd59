//! # Pulmorisk
//!
//! Lung cancer risk prediction over trained classifier artifacts.
//!
//! This crate provides:
//! - Deterministic feature engineering from patient-reported ordinal features
//! - Manifest-driven alignment, scaling and classification against opaque
//!   artifacts exported by an external training pipeline
//! - Risk-aggregate explanation and recommendation text
//! - A SQLite prediction-event log for monitoring
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and pure computation (patient record, feature
//!   engineering, alignment, explanation)
//! - `ports`: Trait definitions for the opaque model artifacts and the
//!   monitoring store
//! - `adapters`: Concrete implementations (exported random forest, standard
//!   scaler, SQLite monitor, artifact loader)
//! - `application`: The prediction service orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::PredictionService;
pub use domain::{PatientRecord, PredictionResult, RiskAggregates, RiskLevel};

/// Result type for Pulmorisk operations
pub type Result<T> = std::result::Result<T, PulmoriskError>;

/// Main error type for Pulmorisk
#[derive(Debug, thiserror::Error)]
pub enum PulmoriskError {
    #[error("Invalid patient record: {0}")]
    Validation(String),

    #[error("Failed to load artifact: {0}")]
    ArtifactLoad(String),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Scaler error: {0}")]
    Scaler(#[from] ports::ScalerError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
