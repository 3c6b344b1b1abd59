//! Feature engineering: derived risk, interaction and binned features.
//!
//! This mirrors the training pipeline exactly; any drift between this module
//! and the features the classifier was trained on silently degrades
//! predictions. The aggregate formulas are shared with [`crate::domain::explain`]
//! so the model path and the narrative path can never disagree.

use std::collections::BTreeMap;

use super::PatientRecord;

/// Severity threshold above which a symptom counts as critical.
pub const CRITICAL_SYMPTOM_THRESHOLD: f64 = 6.0;

/// Age bucket, cut at (0,25], (25,40], (40,55], (55,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    /// Bucket an age. Boundaries are right-closed, matching the training cut.
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        if age <= 25.0 {
            Self::Young
        } else if age <= 40.0 {
            Self::Adult
        } else if age <= 55.0 {
            Self::MiddleAged
        } else {
            Self::Senior
        }
    }

    /// Integer code used as the model feature value.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Young => 0,
            Self::Adult => 1,
            Self::MiddleAged => 2,
            Self::Senior => 3,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Young => write!(f, "Young"),
            Self::Adult => write!(f, "Adult"),
            Self::MiddleAged => write!(f, "Middle_Aged"),
            Self::Senior => write!(f, "Senior"),
        }
    }
}

/// Smoking intensity bucket, cut at (0,2], (2,5], (5,10].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokingLevel {
    Low,
    Medium,
    High,
}

impl SmokingLevel {
    #[must_use]
    pub fn from_score(smoking: f64) -> Self {
        if smoking <= 2.0 {
            Self::Low
        } else if smoking <= 5.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

/// Air pollution bucket, cut at (0,3], (3,6], (6,10].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollutionLevel {
    Low,
    Medium,
    High,
}

impl PollutionLevel {
    #[must_use]
    pub fn from_score(pollution: f64) -> Self {
        if pollution <= 3.0 {
            Self::Low
        } else if pollution <= 6.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

/// Mean of air pollution, dust allergy and occupational hazards.
#[must_use]
pub fn environmental_risk(r: &PatientRecord) -> f64 {
    (r.air_pollution + r.dust_allergy + r.occupational_hazards) / 3.0
}

/// Mean of smoking, alcohol, obesity and inverted diet quality.
#[must_use]
pub fn lifestyle_risk(r: &PatientRecord) -> f64 {
    (r.smoking + r.alcohol_use + r.obesity + (10.0 - r.balanced_diet)) / 4.0
}

/// Mean of genetic risk and chronic lung disease.
#[must_use]
pub fn genetic_health_risk(r: &PatientRecord) -> f64 {
    (r.genetic_risk + r.chronic_lung_disease) / 2.0
}

/// Mean severity across the seven tracked symptoms.
#[must_use]
pub fn symptom_severity(r: &PatientRecord) -> f64 {
    (r.chest_pain
        + r.coughing_of_blood
        + r.fatigue
        + r.weight_loss
        + r.shortness_of_breath
        + r.wheezing
        + r.swallowing_difficulty)
        / 7.0
}

/// Mean of the respiratory cluster.
#[must_use]
pub fn respiratory_score(r: &PatientRecord) -> f64 {
    (r.shortness_of_breath + r.wheezing + r.dry_cough + r.chronic_lung_disease) / 4.0
}

/// Number of critical symptoms at or above [`CRITICAL_SYMPTOM_THRESHOLD`].
#[must_use]
pub fn critical_symptom_count(r: &PatientRecord) -> u32 {
    [
        r.chest_pain,
        r.coughing_of_blood,
        r.weight_loss,
        r.shortness_of_breath,
    ]
    .iter()
    .filter(|&&v| v >= CRITICAL_SYMPTOM_THRESHOLD)
    .count() as u32
}

/// Weighted combination of the four aggregate scores.
#[must_use]
pub fn overall_risk_score(r: &PatientRecord) -> f64 {
    environmental_risk(r) * 0.25
        + lifestyle_risk(r) * 0.30
        + genetic_health_risk(r) * 0.20
        + symptom_severity(r) * 0.25
}

/// A patient record extended with every derived feature the trained model
/// may ask for, keyed by feature name.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRecord {
    values: BTreeMap<String, f64>,
}

impl EngineeredRecord {
    /// Look up a feature value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Extend a raw record with the full engineered feature set.
///
/// Pure computation; recomputing on an identical record yields an identical
/// result. Derived names match the feature manifest written by the training
/// pipeline.
#[must_use]
pub fn engineer(r: &PatientRecord) -> EngineeredRecord {
    let mut values = r.to_map();

    // Binned categoricals, stored as their integer codes.
    values.insert(
        "Age_Group".to_string(),
        f64::from(AgeGroup::from_age(r.age).code()),
    );
    values.insert(
        "Smoking_Level".to_string(),
        f64::from(SmokingLevel::from_score(r.smoking).code()),
    );
    values.insert(
        "Pollution_Level".to_string(),
        f64::from(PollutionLevel::from_score(r.air_pollution).code()),
    );

    // Aggregate risk scores.
    values.insert("Environmental_Risk".to_string(), environmental_risk(r));
    values.insert("Lifestyle_Risk".to_string(), lifestyle_risk(r));
    values.insert("Genetic_Health_Risk".to_string(), genetic_health_risk(r));
    values.insert("Symptom_Severity".to_string(), symptom_severity(r));
    values.insert("Respiratory_Score".to_string(), respiratory_score(r));
    values.insert(
        "Critical_Symptom_Count".to_string(),
        f64::from(critical_symptom_count(r)),
    );
    values.insert("Overall_Risk_Score".to_string(), overall_risk_score(r));

    // Interactions.
    values.insert(
        "Smoking_Age_Interaction".to_string(),
        r.smoking * r.age,
    );
    values.insert(
        "Genetic_Age_Interaction".to_string(),
        r.genetic_risk * r.age,
    );
    values.insert("Smoking_Pollution".to_string(), r.smoking * r.air_pollution);
    values.insert(
        "Obesity_ChronicLung".to_string(),
        r.obesity * r.chronic_lung_disease,
    );
    values.insert(
        "PassiveSmoker_Pollution".to_string(),
        r.passive_smoker * r.air_pollution,
    );

    // Polynomial terms.
    values.insert("Smoking_squared".to_string(), r.smoking * r.smoking);
    values.insert(
        "Air Pollution_squared".to_string(),
        r.air_pollution * r.air_pollution,
    );
    values.insert(
        "Genetic Risk_squared".to_string(),
        r.genetic_risk * r.genetic_risk,
    );

    EngineeredRecord { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testutil::{minimal_record, sample_record};

    #[test]
    fn test_age_bucket_boundaries() {
        assert_eq!(AgeGroup::from_age(25.0), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(26.0), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(40.0), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(41.0), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(55.0), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(56.0), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(100.0), AgeGroup::Senior);
    }

    #[test]
    fn test_smoking_bucket_boundaries() {
        assert_eq!(SmokingLevel::from_score(2.0), SmokingLevel::Low);
        assert_eq!(SmokingLevel::from_score(3.0), SmokingLevel::Medium);
        assert_eq!(SmokingLevel::from_score(5.0), SmokingLevel::Medium);
        assert_eq!(SmokingLevel::from_score(6.0), SmokingLevel::High);
    }

    #[test]
    fn test_critical_symptom_threshold_boundary() {
        let mut record = minimal_record();
        record.chest_pain = 6.0;
        assert_eq!(critical_symptom_count(&record), 1);

        record.chest_pain = 5.0;
        assert_eq!(critical_symptom_count(&record), 0);
    }

    #[test]
    fn test_sample_record_critical_count() {
        // Chest Pain 7, Coughing of Blood 6 and Shortness of Breath 8 are
        // at or above the threshold; Weight Loss 5 is not.
        assert_eq!(critical_symptom_count(&sample_record()), 3);
    }

    #[test]
    fn test_aggregate_formulas() {
        let record = sample_record();

        assert!((environmental_risk(&record) - 6.0).abs() < 1e-12);
        assert!((lifestyle_risk(&record) - 6.5).abs() < 1e-12);
        assert!((genetic_health_risk(&record) - 4.5).abs() < 1e-12);
        assert!((symptom_severity(&record) - 43.0 / 7.0).abs() < 1e-12);
        assert!((respiratory_score(&record) - 23.0 / 4.0).abs() < 1e-12);

        let expected_overall = 6.0 * 0.25 + 6.5 * 0.30 + 4.5 * 0.20 + (43.0 / 7.0) * 0.25;
        assert!((overall_risk_score(&record) - expected_overall).abs() < 1e-12);
    }

    #[test]
    fn test_lifestyle_risk_monotonic() {
        let mut risky = minimal_record();
        risky.smoking = 8.0;
        risky.alcohol_use = 8.0;
        risky.obesity = 7.0;
        risky.balanced_diet = 1.0;

        let mut healthy = minimal_record();
        healthy.smoking = 1.0;
        healthy.alcohol_use = 1.0;
        healthy.obesity = 1.0;
        healthy.balanced_diet = 7.0;

        assert!(lifestyle_risk(&risky) > lifestyle_risk(&healthy));
    }

    #[test]
    fn test_engineer_is_deterministic() {
        let record = sample_record();
        assert_eq!(engineer(&record), engineer(&record));
    }

    #[test]
    fn test_engineer_produces_full_feature_set() {
        let engineered = engineer(&sample_record());

        // 23 raw + 18 derived.
        assert_eq!(engineered.len(), 41);
        assert_eq!(engineered.get("Age_Group"), Some(2.0));
        assert_eq!(engineered.get("Smoking_Level"), Some(2.0));
        assert_eq!(engineered.get("Smoking_Age_Interaction"), Some(385.0));
        assert_eq!(engineered.get("Genetic_Age_Interaction"), Some(275.0));
        assert_eq!(engineered.get("Smoking_squared"), Some(49.0));
        assert_eq!(engineered.get("Air Pollution_squared"), Some(49.0));
        assert_eq!(engineered.get("Genetic Risk_squared"), Some(25.0));
        assert_eq!(engineered.get("Critical_Symptom_Count"), Some(3.0));
        assert_eq!(engineered.get("No Such Feature"), None);
    }
}
