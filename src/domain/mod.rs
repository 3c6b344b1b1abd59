//! Domain layer: Core types and pure computation.
//!
//! Everything in this module is deterministic and free of I/O. The same
//! patient record always produces the same engineered features, aggregates
//! and recommendation text.

pub mod explain;
pub mod features;
pub mod manifest;
mod patient;
mod prediction;

pub use explain::RiskAggregates;
pub use features::EngineeredRecord;
pub use manifest::FeatureManifest;
pub use patient::{PatientRecord, RAW_FEATURE_NAMES};
pub use prediction::{PredictionResult, RiskLevel};

#[cfg(test)]
pub(crate) mod testutil {
    use super::PatientRecord;

    /// The reference patient used across the test suite.
    pub(crate) fn sample_record() -> PatientRecord {
        PatientRecord {
            age: 55.0,
            gender: 1.0,
            air_pollution: 7.0,
            alcohol_use: 6.0,
            dust_allergy: 5.0,
            occupational_hazards: 6.0,
            genetic_risk: 5.0,
            chronic_lung_disease: 4.0,
            balanced_diet: 3.0,
            obesity: 6.0,
            smoking: 7.0,
            passive_smoker: 5.0,
            chest_pain: 7.0,
            coughing_of_blood: 6.0,
            fatigue: 7.0,
            weight_loss: 5.0,
            shortness_of_breath: 8.0,
            wheezing: 6.0,
            swallowing_difficulty: 4.0,
            clubbing_of_finger_nails: 3.0,
            frequent_cold: 4.0,
            dry_cough: 5.0,
            snoring: 3.0,
        }
    }

    /// A patient with every feature at its documented minimum risk.
    pub(crate) fn minimal_record() -> PatientRecord {
        PatientRecord {
            age: 14.0,
            gender: 1.0,
            air_pollution: 1.0,
            alcohol_use: 1.0,
            dust_allergy: 1.0,
            occupational_hazards: 1.0,
            genetic_risk: 1.0,
            chronic_lung_disease: 1.0,
            balanced_diet: 7.0,
            obesity: 1.0,
            smoking: 1.0,
            passive_smoker: 1.0,
            chest_pain: 1.0,
            coughing_of_blood: 1.0,
            fatigue: 1.0,
            weight_loss: 1.0,
            shortness_of_breath: 1.0,
            wheezing: 1.0,
            swallowing_difficulty: 1.0,
            clubbing_of_finger_nails: 1.0,
            frequent_cold: 1.0,
            dry_cough: 1.0,
            snoring: 1.0,
        }
    }
}
