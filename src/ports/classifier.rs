//! Classifier port: Trait for the opaque trained classification model.
//!
//! The classifier is a black-box learned artifact. This trait defines only
//! the contract the pipeline needs: a fixed class set, per-class probability,
//! and an argmax label. Implementations must be immutable after load so
//! concurrent predictions are safe.

use crate::domain::RiskLevel;

/// Errors that can occur during classification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model not loaded: {0}")]
    NotLoaded(String),

    #[error("Feature vector length mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("Malformed model artifact: {0}")]
    Malformed(String),
}

/// Trait for trained classification models.
///
/// All methods are read-only; no internal mutable state is touched per
/// prediction, so `&self` calls may run concurrently.
pub trait Classifier: Send + Sync {
    /// The model's class set, in probability-vector order.
    ///
    /// # Errors
    /// Returns `ClassifierError::NotLoaded` before a successful load.
    fn classes(&self) -> Result<Vec<RiskLevel>, ClassifierError>;

    /// Width of the expected input vector.
    ///
    /// # Errors
    /// Returns `ClassifierError::NotLoaded` before a successful load.
    fn n_features(&self) -> Result<usize, ClassifierError>;

    /// Per-class probability for one feature vector, in [`Self::classes`]
    /// order. Values are non-negative and sum to 1 within floating tolerance.
    ///
    /// # Errors
    /// Returns error if the model is not loaded or the vector width is wrong.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;

    /// Predict a label with its probability vector.
    ///
    /// The label is the argmax of [`Self::predict_proba`]; ties resolve to
    /// the earliest class, matching the training framework's behavior.
    ///
    /// # Errors
    /// Returns error if the model is not loaded or the vector width is wrong.
    fn predict(&self, features: &[f64]) -> Result<(RiskLevel, Vec<f64>), ClassifierError> {
        let probabilities = self.predict_proba(features)?;
        let classes = self.classes()?;

        let mut best = 0;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = i;
            }
        }

        Ok((classes[best], probabilities))
    }
}
