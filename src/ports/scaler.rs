//! Scaler port: Trait for the fitted standardization artifact.

/// Errors that can occur during scaling.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScalerError {
    #[error("Scaler not loaded: {0}")]
    NotLoaded(String),

    #[error("Feature vector length mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("Malformed scaler artifact: {0}")]
    Malformed(String),
}

/// Trait for fitted feature scalers.
///
/// Parameters are fit during the external training phase and read-only after
/// load; `transform` never mutates them.
pub trait Scaler: Send + Sync {
    /// Width of the expected input vector.
    ///
    /// # Errors
    /// Returns `ScalerError::NotLoaded` before a successful load.
    fn n_features(&self) -> Result<usize, ScalerError>;

    /// Apply the fitted per-position affine transform to a vector.
    ///
    /// # Errors
    /// Returns error if the scaler is not loaded or the vector width is wrong.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScalerError>;
}
