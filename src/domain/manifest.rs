//! Feature manifest: the ordered feature-name contract of the trained model.
//!
//! The manifest is produced by the training pipeline (one name per line) and
//! defines the exact positional layout the scaler and classifier expect.
//! It is loaded once at startup and immutable afterwards.

use super::features::EngineeredRecord;

/// Ordered list of feature names defining the model input vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureManifest {
    names: Vec<String>,
}

impl FeatureManifest {
    /// Build a manifest from an ordered name list.
    ///
    /// # Errors
    /// Returns a message if the list is empty or contains duplicates.
    pub fn new(names: Vec<String>) -> std::result::Result<Self, String> {
        if names.is_empty() {
            return Err("feature manifest is empty".to_string());
        }

        let mut seen = std::collections::BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate feature name in manifest: {name}"));
            }
        }

        Ok(Self { names })
    }

    /// Parse a manifest from its text form, one feature name per line.
    /// Blank lines and surrounding whitespace are ignored.
    ///
    /// # Errors
    /// Returns a message if no names remain after parsing, or on duplicates.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(names)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Map an engineered record onto the manifest's positional vector.
    ///
    /// Names absent from the record are zero-filled and logged; this keeps
    /// one-hot columns the training pipeline may have emitted from failing
    /// the request, at the cost of masking renamed features. Names present
    /// in the record but not in the manifest are dropped.
    #[must_use]
    pub fn align(&self, engineered: &EngineeredRecord) -> Vec<f64> {
        self.names
            .iter()
            .map(|name| match engineered.get(name) {
                Some(value) => value,
                None => {
                    tracing::warn!(
                        feature = %name,
                        "manifest feature absent from engineered record, zero-filled"
                    );
                    0.0
                }
            })
            .collect()
    }
}

/// The feature list the bundled training pipeline exports. Kept as the
/// reference contract for tests; production deployments load the manifest
/// artifact written at training time.
pub const TRAINED_FEATURES: [&str; 28] = [
    "Smoking",
    "Genetic Risk",
    "Air Pollution",
    "Alcohol use",
    "Chronic Lung Disease",
    "Age",
    "Obesity",
    "Chest Pain",
    "Coughing of Blood",
    "Fatigue",
    "Weight Loss",
    "Shortness of Breath",
    "Wheezing",
    "Passive Smoker",
    "Occupational Hazards",
    "Overall_Risk_Score",
    "Lifestyle_Risk",
    "Environmental_Risk",
    "Symptom_Severity",
    "Respiratory_Score",
    "Genetic_Health_Risk",
    "Smoking_Age_Interaction",
    "Genetic_Age_Interaction",
    "Smoking_squared",
    "Air Pollution_squared",
    "Critical_Symptom_Count",
    "Age_Group",
    "Smoking_Level",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::engineer;
    use crate::domain::testutil::sample_record;

    fn trained_manifest() -> FeatureManifest {
        FeatureManifest::new(TRAINED_FEATURES.iter().map(|s| s.to_string()).collect())
            .expect("reference manifest is valid")
    }

    #[test]
    fn test_empty_manifest_rejected() {
        assert!(FeatureManifest::new(Vec::new()).is_err());
        assert!(FeatureManifest::parse("\n  \n").is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = FeatureManifest::parse("Age\nSmoking\nAge\n").expect_err("should reject");
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let manifest = FeatureManifest::parse("Age\n\n  Smoking  \n").expect("should parse");
        assert_eq!(manifest.names(), ["Age", "Smoking"]);
    }

    #[test]
    fn test_align_follows_manifest_order() {
        let engineered = engineer(&sample_record());
        let manifest = trained_manifest();
        let vector = manifest.align(&engineered);

        assert_eq!(vector.len(), 28);
        // Positions 0 and 5 are Smoking and Age.
        assert_eq!(vector[0], 7.0);
        assert_eq!(vector[5], 55.0);
        // Last two are Age_Group and Smoking_Level codes.
        assert_eq!(vector[26], 2.0);
        assert_eq!(vector[27], 2.0);
    }

    #[test]
    fn test_align_zero_fills_unknown_names() {
        let engineered = engineer(&sample_record());
        let manifest = FeatureManifest::parse("Smoking\nRenamed_Feature\nAge").expect("parse");
        let vector = manifest.align(&engineered);

        assert_eq!(vector, vec![7.0, 0.0, 55.0]);
    }

    #[test]
    fn test_align_drops_extra_record_entries() {
        let engineered = engineer(&sample_record());
        let manifest = FeatureManifest::parse("Age").expect("parse");
        assert_eq!(manifest.align(&engineered), vec![55.0]);
    }

    #[test]
    fn test_trained_manifest_fully_covered_by_engineering() {
        let engineered = engineer(&sample_record());
        for name in TRAINED_FEATURES {
            assert!(
                engineered.get(name).is_some(),
                "engineered record missing {name}"
            );
        }
    }
}
