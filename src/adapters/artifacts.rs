//! Startup artifact loader.
//!
//! The service consumes three artifacts written by the training pipeline:
//! `model.json` (exported forest), `scaler.json` (fitted standardization)
//! and `features.txt` (ordered feature manifest, one name per line).
//! Missing or unreadable artifacts fail fast here; the service never starts
//! degraded.

use std::path::Path;

use crate::domain::FeatureManifest;
use crate::{PulmoriskError, Result};

use super::forest::RandomForestClassifier;
use super::scaler::StandardScaler;

/// File names expected inside the artifact directory.
pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURES_FILE: &str = "features.txt";

/// The three loaded artifacts, ready to build a prediction service.
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub manifest: FeatureManifest,
    pub scaler: StandardScaler,
    pub classifier: RandomForestClassifier,
}

/// Load and validate all artifacts from a directory.
///
/// # Errors
/// Returns `PulmoriskError::ArtifactLoad` naming the offending file if any
/// artifact is missing, unreadable or malformed.
pub fn load_artifacts(dir: &Path) -> Result<LoadedArtifacts> {
    tracing::info!(dir = %dir.display(), "loading model artifacts");

    let manifest_path = dir.join(FEATURES_FILE);
    let manifest_text = std::fs::read_to_string(&manifest_path).map_err(|e| {
        PulmoriskError::ArtifactLoad(format!("cannot read {}: {e}", manifest_path.display()))
    })?;
    let manifest = FeatureManifest::parse(&manifest_text).map_err(|e| {
        PulmoriskError::ArtifactLoad(format!("invalid manifest {}: {e}", manifest_path.display()))
    })?;

    let mut scaler = StandardScaler::new();
    scaler
        .load(&dir.join(SCALER_FILE))
        .map_err(|e| PulmoriskError::ArtifactLoad(e.to_string()))?;

    let mut classifier = RandomForestClassifier::new();
    classifier
        .load(&dir.join(MODEL_FILE))
        .map_err(|e| PulmoriskError::ArtifactLoad(e.to_string()))?;

    tracing::info!(n_features = manifest.len(), "artifacts loaded");

    Ok(LoadedArtifacts {
        manifest,
        scaler,
        classifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_minimal_artifacts(dir: &Path) {
        let model = serde_json::json!({
            "model_version": "test",
            "classes": ["Low", "High"],
            "n_features": 2,
            "trees": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [[3.0, 1.0]],
            }],
        });
        std::fs::write(dir.join(MODEL_FILE), model.to_string()).expect("write model");

        let scaler = serde_json::json!({ "mean": [0.0, 0.0], "scale": [1.0, 1.0] });
        std::fs::write(dir.join(SCALER_FILE), scaler.to_string()).expect("write scaler");

        let mut f = std::fs::File::create(dir.join(FEATURES_FILE)).expect("create manifest");
        writeln!(f, "Age\nSmoking").expect("write manifest");
    }

    #[test]
    fn test_load_all_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_minimal_artifacts(dir.path());

        let artifacts = load_artifacts(dir.path()).expect("should load");
        assert_eq!(artifacts.manifest.len(), 2);
    }

    #[test]
    fn test_missing_model_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_minimal_artifacts(dir.path());
        std::fs::remove_file(dir.path().join(MODEL_FILE)).expect("remove");

        let err = load_artifacts(dir.path()).expect_err("should fail");
        assert!(matches!(err, PulmoriskError::ArtifactLoad(_)));
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn test_corrupt_scaler_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_minimal_artifacts(dir.path());
        std::fs::write(dir.path().join(SCALER_FILE), "not json").expect("write");

        assert!(matches!(
            load_artifacts(dir.path()),
            Err(PulmoriskError::ArtifactLoad(_))
        ));
    }
}
