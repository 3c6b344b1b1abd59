//! Random forest adapter: Implementation of [`Classifier`] over an exported
//! forest artifact.
//!
//! The training pipeline exports the fitted forest as JSON: per-tree node
//! arrays (child indices, split feature, threshold, per-class leaf counts)
//! plus the class label list. Inference walks each tree to a leaf, normalizes
//! the leaf's class counts into a distribution, and averages across trees;
//! the predicted label is the argmax. The loaded parameters are never
//! mutated, so concurrent predictions are safe.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::RiskLevel;
use crate::ports::{Classifier, ClassifierError};

fn default_model_version() -> String {
    "v1".to_string()
}

/// Forest parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    /// Version string carried into prediction-event logs
    #[serde(default = "default_model_version")]
    pub model_version: String,

    /// Class labels, in probability-vector order
    pub classes: Vec<String>,

    /// Expected input vector width
    pub n_features: usize,

    /// The fitted trees
    pub trees: Vec<ExportedTree>,
}

/// One decision tree in flat node-array form.
///
/// A node `i` is a leaf when `children_left[i] < 0`. For internal nodes the
/// split is `x[feature[i]] <= threshold[i]` going left. `value[i]` holds the
/// per-class sample counts collected at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// Random forest classifier backed by an exported artifact.
#[derive(Debug)]
pub struct RandomForestClassifier {
    model: Option<LoadedForest>,
}

#[derive(Debug)]
struct LoadedForest {
    exported: ExportedForest,
    classes: Vec<RiskLevel>,
}

impl RandomForestClassifier {
    /// Create an empty classifier; call [`Self::load`] or
    /// [`Self::set_model`] before predicting.
    #[must_use]
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Load forest parameters from a JSON artifact.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load(&mut self, path: &Path) -> Result<(), ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::Malformed(format!("cannot read model file {path:?}: {e}"))
        })?;
        let exported: ExportedForest = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::Malformed(format!("invalid model JSON in {path:?}: {e}"))
        })?;
        self.set_model(exported)
    }

    /// Install already-parsed forest parameters after validating them.
    ///
    /// # Errors
    /// Returns `ClassifierError::Malformed` describing the first defect found.
    pub fn set_model(&mut self, exported: ExportedForest) -> Result<(), ClassifierError> {
        let classes = Self::validate(&exported)?;

        tracing::info!(
            model_version = %exported.model_version,
            n_trees = exported.trees.len(),
            n_features = exported.n_features,
            n_classes = classes.len(),
            "loaded random forest model"
        );

        self.model = Some(LoadedForest { exported, classes });
        Ok(())
    }

    /// Version string of the loaded artifact.
    ///
    /// # Errors
    /// Returns `ClassifierError::NotLoaded` before a successful load.
    pub fn model_version(&self) -> Result<&str, ClassifierError> {
        Ok(&self.loaded()?.exported.model_version)
    }

    fn loaded(&self) -> Result<&LoadedForest, ClassifierError> {
        self.model
            .as_ref()
            .ok_or_else(|| ClassifierError::NotLoaded("no forest artifact loaded".to_string()))
    }

    fn validate(exported: &ExportedForest) -> Result<Vec<RiskLevel>, ClassifierError> {
        if exported.n_features == 0 {
            return Err(ClassifierError::Malformed(
                "n_features must be positive".to_string(),
            ));
        }
        if exported.trees.is_empty() {
            return Err(ClassifierError::Malformed(
                "forest contains no trees".to_string(),
            ));
        }

        let mut classes = Vec::with_capacity(exported.classes.len());
        for label in &exported.classes {
            let level = RiskLevel::from_label(label).ok_or_else(|| {
                ClassifierError::Malformed(format!(
                    "unknown class label {label:?} (expected Low/Medium/High)"
                ))
            })?;
            if classes.contains(&level) {
                return Err(ClassifierError::Malformed(format!(
                    "duplicate class label {label:?}"
                )));
            }
            classes.push(level);
        }
        if classes.is_empty() {
            return Err(ClassifierError::Malformed(
                "forest has no classes".to_string(),
            ));
        }

        for (t, tree) in exported.trees.iter().enumerate() {
            let n = tree.children_left.len();
            if tree.children_right.len() != n
                || tree.feature.len() != n
                || tree.threshold.len() != n
                || tree.value.len() != n
            {
                return Err(ClassifierError::Malformed(format!(
                    "tree {t}: node arrays have inconsistent lengths"
                )));
            }
            if n == 0 {
                return Err(ClassifierError::Malformed(format!("tree {t} is empty")));
            }

            for i in 0..n {
                if tree.value[i].len() != classes.len() {
                    return Err(ClassifierError::Malformed(format!(
                        "tree {t} node {i}: value width {} != class count {}",
                        tree.value[i].len(),
                        classes.len()
                    )));
                }

                let left = tree.children_left[i];
                let right = tree.children_right[i];
                if left < 0 {
                    // Leaf: counts must form a normalizable distribution.
                    if right >= 0 {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: half-leaf node"
                        )));
                    }
                    let counts = &tree.value[i];
                    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: invalid leaf counts"
                        )));
                    }
                    if counts.iter().sum::<f64>() <= 0.0 {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: leaf has zero total count"
                        )));
                    }
                } else {
                    // Internal: children must point strictly forward, which
                    // guarantees every walk terminates.
                    let i_idx = i as i64;
                    if left <= i_idx || right <= i_idx || left >= n as i64 || right >= n as i64 {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: child indices out of order"
                        )));
                    }
                    let feature = tree.feature[i];
                    if feature < 0 || feature >= exported.n_features as i64 {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: split feature {feature} out of range"
                        )));
                    }
                    if !tree.threshold[i].is_finite() {
                        return Err(ClassifierError::Malformed(format!(
                            "tree {t} node {i}: non-finite threshold"
                        )));
                    }
                }
            }
        }

        Ok(classes)
    }

    /// Walk one tree to its leaf distribution for the given vector.
    fn tree_proba(tree: &ExportedTree, features: &[f64], n_classes: usize) -> Vec<f64> {
        let mut node = 0usize;
        while tree.children_left[node] >= 0 {
            let feature = tree.feature[node] as usize;
            node = if features[feature] <= tree.threshold[node] {
                tree.children_left[node] as usize
            } else {
                tree.children_right[node] as usize
            };
        }

        let counts = &tree.value[node];
        let total: f64 = counts.iter().sum();
        let mut probs = Vec::with_capacity(n_classes);
        for c in counts {
            probs.push(c / total);
        }
        probs
    }
}

impl Default for RandomForestClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for RandomForestClassifier {
    fn classes(&self) -> Result<Vec<RiskLevel>, ClassifierError> {
        Ok(self.loaded()?.classes.clone())
    }

    fn n_features(&self) -> Result<usize, ClassifierError> {
        Ok(self.loaded()?.exported.n_features)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        let loaded = self.loaded()?;
        let exported = &loaded.exported;

        if features.len() != exported.n_features {
            return Err(ClassifierError::DimensionMismatch {
                got: features.len(),
                expected: exported.n_features,
            });
        }

        let n_classes = loaded.classes.len();
        let mut sums = vec![0.0; n_classes];
        for tree in &exported.trees {
            let probs = Self::tree_proba(tree, features, n_classes);
            for (sum, p) in sums.iter_mut().zip(probs) {
                *sum += p;
            }
        }

        let n_trees = exported.trees.len() as f64;
        for sum in &mut sums {
            *sum /= n_trees;
        }
        Ok(sums)
    }
}
