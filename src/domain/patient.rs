//! Patient record types for lung cancer risk prediction.
//!
//! Features are patient-reported ordinal scores from the training dataset.
//! Field names on the wire use the canonical dataset column names
//! (e.g. `"Air Pollution"`, `"Chronic Lung Disease"`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw patient input: 23 ordinal features.
///
/// All fields are required; the strict feature-engineering contract is
/// enforced at the type level. Values are kept as `f64` so the record can
/// flow directly into the numeric pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years (14-100)
    #[serde(rename = "Age")]
    pub age: f64,

    /// Gender (1 = male, 2 = female)
    #[serde(rename = "Gender")]
    pub gender: f64,

    /// Air pollution exposure (1-8)
    #[serde(rename = "Air Pollution")]
    pub air_pollution: f64,

    /// Alcohol use (1-8)
    #[serde(rename = "Alcohol use")]
    pub alcohol_use: f64,

    /// Dust allergy (1-8)
    #[serde(rename = "Dust Allergy")]
    pub dust_allergy: f64,

    /// Occupational hazards (1-8)
    #[serde(rename = "Occupational Hazards")]
    pub occupational_hazards: f64,

    /// Genetic risk (1-7)
    #[serde(rename = "Genetic Risk")]
    pub genetic_risk: f64,

    /// Chronic lung disease (1-7)
    #[serde(rename = "Chronic Lung Disease")]
    pub chronic_lung_disease: f64,

    /// Balanced diet (1-7)
    #[serde(rename = "Balanced Diet")]
    pub balanced_diet: f64,

    /// Obesity (1-7)
    #[serde(rename = "Obesity")]
    pub obesity: f64,

    /// Smoking (1-8)
    #[serde(rename = "Smoking")]
    pub smoking: f64,

    /// Passive smoker (1-8)
    #[serde(rename = "Passive Smoker")]
    pub passive_smoker: f64,

    /// Chest pain (1-9)
    #[serde(rename = "Chest Pain")]
    pub chest_pain: f64,

    /// Coughing of blood (1-9)
    #[serde(rename = "Coughing of Blood")]
    pub coughing_of_blood: f64,

    /// Fatigue (1-9)
    #[serde(rename = "Fatigue")]
    pub fatigue: f64,

    /// Weight loss (1-8)
    #[serde(rename = "Weight Loss")]
    pub weight_loss: f64,

    /// Shortness of breath (1-9)
    #[serde(rename = "Shortness of Breath")]
    pub shortness_of_breath: f64,

    /// Wheezing (1-8)
    #[serde(rename = "Wheezing")]
    pub wheezing: f64,

    /// Swallowing difficulty (1-8)
    #[serde(rename = "Swallowing Difficulty")]
    pub swallowing_difficulty: f64,

    /// Clubbing of finger nails (1-9)
    #[serde(rename = "Clubbing of Finger Nails")]
    pub clubbing_of_finger_nails: f64,

    /// Frequent cold (1-7)
    #[serde(rename = "Frequent Cold")]
    pub frequent_cold: f64,

    /// Dry cough (1-7)
    #[serde(rename = "Dry Cough")]
    pub dry_cough: f64,

    /// Snoring (1-7)
    #[serde(rename = "Snoring")]
    pub snoring: f64,
}

/// Canonical raw feature names, in dataset column order.
pub const RAW_FEATURE_NAMES: [&str; 23] = [
    "Age",
    "Gender",
    "Air Pollution",
    "Alcohol use",
    "Dust Allergy",
    "Occupational Hazards",
    "Genetic Risk",
    "Chronic Lung Disease",
    "Balanced Diet",
    "Obesity",
    "Smoking",
    "Passive Smoker",
    "Chest Pain",
    "Coughing of Blood",
    "Fatigue",
    "Weight Loss",
    "Shortness of Breath",
    "Wheezing",
    "Swallowing Difficulty",
    "Clubbing of Finger Nails",
    "Frequent Cold",
    "Dry Cough",
    "Snoring",
];

impl PatientRecord {
    /// View the record as a name -> value map, keyed by canonical names.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let values = [
            self.age,
            self.gender,
            self.air_pollution,
            self.alcohol_use,
            self.dust_allergy,
            self.occupational_hazards,
            self.genetic_risk,
            self.chronic_lung_disease,
            self.balanced_diet,
            self.obesity,
            self.smoking,
            self.passive_smoker,
            self.chest_pain,
            self.coughing_of_blood,
            self.fatigue,
            self.weight_loss,
            self.shortness_of_breath,
            self.wheezing,
            self.swallowing_difficulty,
            self.clubbing_of_finger_nails,
            self.frequent_cold,
            self.dry_cough,
            self.snoring,
        ];

        RAW_FEATURE_NAMES
            .iter()
            .zip(values)
            .map(|(name, value)| ((*name).to_string(), value))
            .collect()
    }

    /// Validate that all features are within their documented ranges.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings, one per violation.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let checks: [(&str, f64, f64, f64); 23] = [
            ("Age", self.age, 14.0, 100.0),
            ("Gender", self.gender, 1.0, 2.0),
            ("Air Pollution", self.air_pollution, 1.0, 8.0),
            ("Alcohol use", self.alcohol_use, 1.0, 8.0),
            ("Dust Allergy", self.dust_allergy, 1.0, 8.0),
            ("Occupational Hazards", self.occupational_hazards, 1.0, 8.0),
            ("Genetic Risk", self.genetic_risk, 1.0, 7.0),
            ("Chronic Lung Disease", self.chronic_lung_disease, 1.0, 7.0),
            ("Balanced Diet", self.balanced_diet, 1.0, 7.0),
            ("Obesity", self.obesity, 1.0, 7.0),
            ("Smoking", self.smoking, 1.0, 8.0),
            ("Passive Smoker", self.passive_smoker, 1.0, 8.0),
            ("Chest Pain", self.chest_pain, 1.0, 9.0),
            ("Coughing of Blood", self.coughing_of_blood, 1.0, 9.0),
            ("Fatigue", self.fatigue, 1.0, 9.0),
            ("Weight Loss", self.weight_loss, 1.0, 8.0),
            ("Shortness of Breath", self.shortness_of_breath, 1.0, 9.0),
            ("Wheezing", self.wheezing, 1.0, 8.0),
            ("Swallowing Difficulty", self.swallowing_difficulty, 1.0, 8.0),
            (
                "Clubbing of Finger Nails",
                self.clubbing_of_finger_nails,
                1.0,
                9.0,
            ),
            ("Frequent Cold", self.frequent_cold, 1.0, 7.0),
            ("Dry Cough", self.dry_cough, 1.0, 7.0),
            ("Snoring", self.snoring, 1.0, 7.0),
        ];

        for (name, value, min, max) in checks {
            // NaN fails the range check as well.
            if !(min..=max).contains(&value) {
                errors.push(format!("{name} {value} out of range [{min}, {max}]"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
