//! Standard scaler adapter: Implementation of [`Scaler`] over exported
//! mean/scale parameters.
//!
//! The training pipeline fits the standardization and exports per-feature
//! mean and scale as JSON. `transform` applies `(x - mean) / scale`
//! positionally; parameters are read-only after load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::{Scaler, ScalerError};

/// Scaler parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Fitted standard scaler backed by an exported artifact.
#[derive(Debug)]
pub struct StandardScaler {
    params: Option<ExportedScaler>,
}

impl StandardScaler {
    /// Create an empty scaler; call [`Self::load`] or [`Self::set_params`]
    /// before transforming.
    #[must_use]
    pub fn new() -> Self {
        Self { params: None }
    }

    /// Load scaler parameters from a JSON artifact.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load(&mut self, path: &Path) -> Result<(), ScalerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScalerError::Malformed(format!("cannot read scaler file {path:?}: {e}"))
        })?;
        let params: ExportedScaler = serde_json::from_str(&content)
            .map_err(|e| ScalerError::Malformed(format!("invalid scaler JSON in {path:?}: {e}")))?;
        self.set_params(params)
    }

    /// Install already-parsed scaler parameters after validating them.
    ///
    /// # Errors
    /// Returns `ScalerError::Malformed` on empty, mismatched or degenerate
    /// parameters.
    pub fn set_params(&mut self, params: ExportedScaler) -> Result<(), ScalerError> {
        if params.mean.is_empty() {
            return Err(ScalerError::Malformed("scaler has no features".to_string()));
        }
        if params.mean.len() != params.scale.len() {
            return Err(ScalerError::Malformed(format!(
                "mean width {} != scale width {}",
                params.mean.len(),
                params.scale.len()
            )));
        }
        if params.mean.iter().any(|m| !m.is_finite()) {
            return Err(ScalerError::Malformed(
                "non-finite mean entry".to_string(),
            ));
        }
        if params.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(ScalerError::Malformed(
                "scale entries must be finite and non-zero".to_string(),
            ));
        }

        tracing::info!(n_features = params.mean.len(), "loaded standard scaler");
        self.params = Some(params);
        Ok(())
    }

    fn loaded(&self) -> Result<&ExportedScaler, ScalerError> {
        self.params
            .as_ref()
            .ok_or_else(|| ScalerError::NotLoaded("no scaler artifact loaded".to_string()))
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> Result<usize, ScalerError> {
        Ok(self.loaded()?.mean.len())
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScalerError> {
        let params = self.loaded()?;
        if features.len() != params.mean.len() {
            return Err(ScalerError::DimensionMismatch {
                got: features.len(),
                expected: params.mean.len(),
            });
        }

        Ok(features
            .iter()
            .zip(params.mean.iter().zip(&params.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_scaler() -> StandardScaler {
        let mut scaler = StandardScaler::new();
        scaler
            .set_params(ExportedScaler {
                mean: vec![1.0, 10.0],
                scale: vec![2.0, 5.0],
            })
            .expect("valid params");
        scaler
    }

    #[test]
    fn test_not_loaded_error() {
        let scaler = StandardScaler::new();
        assert!(matches!(
            scaler.transform(&[1.0]),
            Err(ScalerError::NotLoaded(_))
        ));
        assert!(scaler.n_features().is_err());
    }

    #[test]
    fn test_affine_transform() {
        let scaler = loaded_scaler();
        let out = scaler.transform(&[3.0, 0.0]).expect("transform");
        assert_eq!(out, vec![1.0, -2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = loaded_scaler();
        assert!(matches!(
            scaler.transform(&[1.0, 2.0, 3.0]),
            Err(ScalerError::DimensionMismatch {
                got: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let err = StandardScaler::new()
            .set_params(ExportedScaler {
                mean: vec![0.0],
                scale: vec![0.0],
            })
            .expect_err("should reject");
        assert!(matches!(err, ScalerError::Malformed(_)));
    }

    #[test]
    fn test_width_mismatch_rejected() {
        assert!(StandardScaler::new()
            .set_params(ExportedScaler {
                mean: vec![0.0, 1.0],
                scale: vec![1.0],
            })
            .is_err());
    }
}
