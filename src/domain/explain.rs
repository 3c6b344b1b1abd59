//! Risk explanation: narrative aggregates and recommendation text.
//!
//! The explainer is decoupled from the model's feature contract: it works on
//! the raw record only, through the same aggregate formulas the feature
//! engineering uses, and feeds the human-facing part of the result.

use serde::{Deserialize, Serialize};

use super::features;
use super::{PatientRecord, RiskLevel};

/// Aggregate scores used for narrative output and recommendation selection.
///
/// Serialized field names match the public API's `risk_factors` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAggregates {
    #[serde(rename = "Lifestyle Risk")]
    pub lifestyle: f64,

    #[serde(rename = "Environmental Risk")]
    pub environmental: f64,

    #[serde(rename = "Genetic/Health Risk")]
    pub genetic_health: f64,

    #[serde(rename = "Symptom Severity")]
    pub symptom_severity: f64,

    #[serde(rename = "Critical Symptoms")]
    pub critical_symptom_count: u32,
}

/// Compute the narrative aggregates for a raw record.
#[must_use]
pub fn explain(record: &PatientRecord) -> RiskAggregates {
    RiskAggregates {
        lifestyle: features::lifestyle_risk(record),
        environmental: features::environmental_risk(record),
        genetic_health: features::genetic_health_risk(record),
        symptom_severity: features::symptom_severity(record),
        critical_symptom_count: features::critical_symptom_count(record),
    }
}

/// Aggregate score above which a targeted recommendation is added.
const ELEVATED_RISK_THRESHOLD: f64 = 6.0;

/// Critical-symptom count at which urgent care is recommended.
const URGENT_SYMPTOM_COUNT: u32 = 2;

/// Build the ordered recommendation list for a prediction.
///
/// Order is part of the contract: base recommendation for the predicted
/// level, then conditional additions, then the two general ones.
#[must_use]
pub fn recommendations(aggregates: &RiskAggregates, prediction: RiskLevel) -> Vec<String> {
    let mut out = Vec::new();

    out.push(
        match prediction {
            RiskLevel::High => {
                "Seek immediate medical consultation for comprehensive screening"
            }
            RiskLevel::Medium => "Schedule a medical check-up within the next month",
            RiskLevel::Low => "Maintain regular health check-ups and healthy lifestyle",
        }
        .to_string(),
    );

    if aggregates.lifestyle > ELEVATED_RISK_THRESHOLD {
        out.push(
            "Consider smoking cessation programs and reduce alcohol consumption".to_string(),
        );
        out.push("Adopt a regular exercise routine and balanced diet".to_string());
    }

    if aggregates.environmental > ELEVATED_RISK_THRESHOLD {
        out.push(
            "Minimize exposure to pollutants and use protective equipment at work".to_string(),
        );
        out.push("Consider air purifiers for indoor air quality".to_string());
    }

    if aggregates.symptom_severity > ELEVATED_RISK_THRESHOLD {
        out.push("Document all symptoms and discuss with a healthcare provider".to_string());
    }

    if aggregates.critical_symptom_count >= URGENT_SYMPTOM_COUNT {
        out.push("Critical symptoms detected - seek immediate medical attention".to_string());
    }

    out.push("Follow prescribed medications and treatment plans".to_string());
    out.push("Monitor symptoms regularly and keep health records".to_string());

    out
}
