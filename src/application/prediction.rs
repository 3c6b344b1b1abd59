//! Prediction service: Orchestrates the feature-to-risk pipeline.
//!
//! This service coordinates:
//! - Input validation
//! - Feature engineering
//! - Manifest alignment
//! - Scaling and classification
//! - Risk explanation and result assembly

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{explain, features, FeatureManifest, PatientRecord, PredictionResult};
use crate::ports::{Classifier, Scaler};
use crate::{PulmoriskError, Result};

/// Service for running the prediction pipeline.
///
/// Immutable once constructed: the manifest, scaler and classifier are
/// shared read-only across all callers, so concurrent `predict` calls need
/// no synchronization. Construction fails fast if the artifacts disagree on
/// vector width, so a dimension mismatch can never surface at request time.
#[derive(Debug)]
pub struct PredictionService<C, S>
where
    C: Classifier,
    S: Scaler,
{
    manifest: FeatureManifest,
    scaler: Arc<S>,
    classifier: Arc<C>,
}

impl<C, S> PredictionService<C, S>
where
    C: Classifier,
    S: Scaler,
{
    /// Create a new prediction service over loaded artifacts.
    ///
    /// # Errors
    /// Returns `NotLoaded` errors if either artifact is missing, and
    /// `ArtifactLoad` if manifest, scaler and classifier widths disagree.
    pub fn new(
        manifest: FeatureManifest,
        scaler: Arc<S>,
        classifier: Arc<C>,
    ) -> Result<Self> {
        let n = manifest.len();
        let scaler_width = scaler.n_features()?;
        let model_width = classifier.n_features()?;

        if scaler_width != n || model_width != n {
            return Err(PulmoriskError::ArtifactLoad(format!(
                "artifact widths disagree: manifest {n}, scaler {scaler_width}, model {model_width}"
            )));
        }

        tracing::info!(n_features = n, "prediction service ready");
        Ok(Self {
            manifest,
            scaler,
            classifier,
        })
    }

    /// Run the full pipeline for one patient record.
    ///
    /// Deterministic: the same record always yields the same label,
    /// probabilities and aggregates. No I/O happens on this path.
    ///
    /// # Errors
    /// Returns `Validation` listing out-of-range features, or a classifier/
    /// scaler error if an artifact misbehaves.
    pub fn predict(&self, patient: &PatientRecord) -> Result<PredictionResult> {
        patient
            .validate()
            .map_err(|errors| PulmoriskError::Validation(errors.join("; ")))?;

        tracing::debug!("engineering features");
        let engineered = features::engineer(patient);
        let aligned = self.manifest.align(&engineered);

        tracing::debug!("scaling and classifying");
        let scaled = self.scaler.transform(&aligned)?;
        let (prediction, probs) = self.classifier.predict(&scaled)?;

        let classes = self.classifier.classes()?;
        let probabilities: BTreeMap<String, f64> = classes
            .iter()
            .zip(probs)
            .map(|(class, p)| (class.as_str().to_string(), p))
            .collect();
        let confidence = probabilities
            .values()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        let risk_factors = explain::explain(patient);
        let recommendations = explain::recommendations(&risk_factors, prediction);

        Ok(PredictionResult {
            prediction,
            confidence,
            probabilities,
            risk_factors,
            overall_risk_score: features::overall_risk_score(patient),
            recommendations,
            created_at: chrono::Utc::now(),
        })
    }

    /// Run the pipeline independently for each record.
    ///
    /// Results mirror input order; records share no state, so a failure on
    /// one record fails the batch without partial output.
    ///
    /// # Errors
    /// Returns the first error encountered, in input order.
    pub fn predict_batch(&self, patients: &[PatientRecord]) -> Result<Vec<PredictionResult>> {
        patients.iter().map(|p| self.predict(p)).collect()
    }
}
