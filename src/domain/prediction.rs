//! Prediction result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::explain::RiskAggregates;

/// Risk level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk, routine check-ups
    Low,
    /// Medium risk, follow-up recommended
    Medium,
    /// High risk, consultation advised
    High,
}

impl RiskLevel {
    /// Parse a class label from a model artifact.
    ///
    /// Labels are matched case-insensitively; anything outside the canonical
    /// {Low, Medium, High} set is rejected so mislabelled artifacts fail at
    /// load time instead of at request time.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Canonical label string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Medium => "Medium risk - Follow-up recommended",
            Self::High => "High risk - Immediate consultation advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete result of one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted risk level
    pub prediction: RiskLevel,

    /// Highest per-class probability
    pub confidence: f64,

    /// Per-class probability, keyed by canonical class label
    pub probabilities: BTreeMap<String, f64>,

    /// Narrative risk aggregates, computed from the raw record
    pub risk_factors: RiskAggregates,

    /// Weighted overall risk score
    pub overall_risk_score: f64,

    /// Ordered recommendation texts
    pub recommendations: Vec<String>,

    /// Timestamp of prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}
