//! Classifier - the opaque binary model behind one trait
//!
//! A trained classifier only needs to answer two questions about a
//! normalized vector: which class, and with what probabilities.

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, PredictError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// LABELS
// ============================================================================

/// Predicted class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChurnLabel {
    NotChurned,
    Churned,
}

impl ChurnLabel {
    pub fn as_u8(self) -> u8 {
        match self {
            ChurnLabel::NotChurned => 0,
            ChurnLabel::Churned => 1,
        }
    }

    pub fn is_churned(self) -> bool {
        self == ChurnLabel::Churned
    }
}

impl From<ChurnLabel> for u8 {
    fn from(label: ChurnLabel) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for ChurnLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ChurnLabel::NotChurned),
            1 => Ok(ChurnLabel::Churned),
            other => Err(format!("churn label must be 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChurnLabel::NotChurned => f.write_str("not churned"),
            ChurnLabel::Churned => f.write_str("churned"),
        }
    }
}

/// Class probability pair `[p(not churned), p(churned)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities(pub [f64; 2]);

impl ClassProbabilities {
    /// Check the pair is usable
    pub fn validated(pair: [f64; 2]) -> Result<Self, PredictError> {
        if pair.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(PredictError::Inference(format!(
                "classifier returned invalid probabilities {:?}",
                pair
            )));
        }
        Ok(Self(pair))
    }

    pub fn not_churned(&self) -> f64 {
        self.0[0]
    }

    pub fn churned(&self) -> f64 {
        self.0[1]
    }

    /// Argmax; ties go to class 0
    pub fn label(&self) -> ChurnLabel {
        if self.churned() > self.not_churned() {
            ChurnLabel::Churned
        } else {
            ChurnLabel::NotChurned
        }
    }

    /// Probability mass of the given class
    pub fn of(&self, label: ChurnLabel) -> f64 {
        match label {
            ChurnLabel::NotChurned => self.not_churned(),
            ChurnLabel::Churned => self.churned(),
        }
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for loaded classifiers (native JSON models, ONNX, ...)
pub trait Classifier: Send + Sync {
    /// Short name of the model family
    fn kind(&self) -> &'static str;

    /// Class probabilities for one normalized vector
    fn predict_proba(&self, x: &FeatureVector) -> Result<ClassProbabilities, PredictError>;

    /// Class label for one normalized vector
    fn predict(&self, x: &FeatureVector) -> Result<ChurnLabel, PredictError> {
        Ok(self.predict_proba(x)?.label())
    }
}

// ============================================================================
// LOGISTIC REGRESSION
// ============================================================================

/// Linear model: `p(churned) = sigmoid(w · x + b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ArtifactError::invalid(
                "logistic regression",
                format!(
                    "{} coefficients, expected {}",
                    self.coefficients.len(),
                    FEATURE_COUNT
                ),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::invalid(
                "logistic regression",
                "coefficients must be finite",
            ));
        }
        Ok(())
    }

    pub fn decision_function(&self, x: &FeatureVector) -> f64 {
        let w = Array1::from(self.coefficients.clone());
        w.dot(&x.to_array()) + self.intercept
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn predict_proba(&self, x: &FeatureVector) -> Result<ClassProbabilities, PredictError> {
        let p = sigmoid(self.decision_function(x));
        ClassProbabilities::validated([1.0 - p, p])
    }
}

// ============================================================================
// RANDOM FOREST
// ============================================================================

/// Marker for "no child" in the array tree encoding
pub const TREE_LEAF: i64 = -1;

/// One decision tree in flat array form
///
/// Node `i` splits on `feature[i] <= threshold[i]`; `value[i]` holds the
/// class weights at that node and is only read at leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n = self.node_count();
        let invalid = |reason: String| ArtifactError::invalid("decision tree", reason);

        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid(format!("node arrays disagree on length ({} nodes)", n)));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has exactly one child", i)));
                }
                let weights = self.value[i];
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights[0] + weights[1] <= 0.0 {
                    return Err(invalid(format!("leaf {} has unusable class weights", i)));
                }
                continue;
            }

            // Children always come after their parent, which also rules out cycles
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(invalid(format!("node {} has child {} out of range", i, child)));
                }
            }
            if self.feature[i] < 0 || self.feature[i] >= FEATURE_COUNT as i64 {
                return Err(invalid(format!(
                    "node {} splits on feature {}",
                    i, self.feature[i]
                )));
            }
            if self.threshold[i].is_nan() {
                return Err(invalid(format!("node {} has a NaN threshold", i)));
            }
        }

        Ok(())
    }

    /// Normalized class weights of the leaf `x` falls into
    pub fn leaf_probabilities(&self, x: &FeatureVector) -> [f64; 2] {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let feature = self.feature[node] as usize;
            node = if x.values[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let [w0, w1] = self.value[node];
        let total = w0 + w1;
        [w0 / total, w1 / total]
    }
}

/// Bagged trees; probabilities are the mean of per-tree leaf probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid("random forest", "forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| {
                ArtifactError::invalid("random forest", format!("tree {}: {}", i, e))
            })?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn predict_proba(&self, x: &FeatureVector) -> Result<ClassProbabilities, PredictError> {
        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_probabilities(x);
            sum[0] += p0;
            sum[1] += p1;
        }
        let n = self.trees.len() as f64;
        ClassProbabilities::validated([sum[0] / n, sum[1] / n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_with(index: usize, value: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[index] = value;
        FeatureVector::from_values(values)
    }

    /// Single split on support_calls at 0.5
    fn stump(left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![4, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![[0.0, 0.0], left, right],
        }
    }

    #[test]
    fn test_label_from_probabilities() {
        assert_eq!(ClassProbabilities([0.2, 0.8]).label(), ChurnLabel::Churned);
        assert_eq!(ClassProbabilities([0.8, 0.2]).label(), ChurnLabel::NotChurned);
        // Tie goes to class 0
        assert_eq!(ClassProbabilities([0.5, 0.5]).label(), ChurnLabel::NotChurned);
    }

    #[test]
    fn test_probability_of_label() {
        let p = ClassProbabilities([0.3, 0.7]);
        assert_eq!(p.of(ChurnLabel::Churned), 0.7);
        assert_eq!(p.of(ChurnLabel::NotChurned), 0.3);
    }

    #[test]
    fn test_invalid_probabilities() {
        assert!(ClassProbabilities::validated([f64::NAN, 0.5]).is_err());
        assert!(ClassProbabilities::validated([-0.1, 1.1]).is_err());
        assert!(ClassProbabilities::validated([0.4, 0.6]).is_ok());
    }

    #[test]
    fn test_label_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ChurnLabel::Churned).unwrap(), "1");
        assert_eq!(serde_json::from_str::<ChurnLabel>("0").unwrap(), ChurnLabel::NotChurned);
        assert!(serde_json::from_str::<ChurnLabel>("2").is_err());
    }

    #[test]
    fn test_logistic_regression() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[4] = 2.0;
        let model = LogisticRegression { coefficients, intercept: -1.0 };
        assert!(model.validate().is_ok());

        // z = 0 → even odds, tie → not churned
        let even = model.predict_proba(&vector_with(4, 0.5)).unwrap();
        assert!((even.churned() - 0.5).abs() < 1e-12);
        assert_eq!(model.predict(&vector_with(4, 0.5)).unwrap(), ChurnLabel::NotChurned);

        let high = model.predict_proba(&vector_with(4, 3.0)).unwrap();
        assert!(high.churned() > 0.99);
        assert!((high.churned() + high.not_churned() - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&vector_with(4, 3.0)).unwrap(), ChurnLabel::Churned);
    }

    #[test]
    fn test_logistic_regression_validation() {
        let short = LogisticRegression { coefficients: vec![1.0; 9], intercept: 0.0 };
        assert!(short.validate().is_err());

        let nan = LogisticRegression { coefficients: vec![f64::NAN; FEATURE_COUNT], intercept: 0.0 };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_tree_traversal() {
        let tree = stump([9.0, 1.0], [1.0, 3.0]);
        assert!(tree.validate().is_ok());

        // Threshold itself goes left
        assert_eq!(tree.leaf_probabilities(&vector_with(4, 0.5)), [0.9, 0.1]);
        assert_eq!(tree.leaf_probabilities(&vector_with(4, 0.6)), [0.25, 0.75]);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForest {
            trees: vec![stump([1.0, 0.0], [0.0, 1.0]), stump([1.0, 0.0], [0.5, 0.5])],
        };
        assert!(forest.validate().is_ok());

        let p = forest.predict_proba(&vector_with(4, 2.0)).unwrap();
        assert!((p.churned() - 0.75).abs() < 1e-12);
        assert_eq!(forest.predict(&vector_with(4, 2.0)).unwrap(), ChurnLabel::Churned);
        assert_eq!(forest.predict(&vector_with(4, 0.0)).unwrap(), ChurnLabel::NotChurned);
    }

    #[test]
    fn test_tree_validation() {
        let mut bad_child = stump([1.0, 0.0], [0.0, 1.0]);
        bad_child.children_right[0] = 7;
        assert!(bad_child.validate().is_err());

        let mut self_loop = stump([1.0, 0.0], [0.0, 1.0]);
        self_loop.children_left[0] = 0;
        assert!(self_loop.validate().is_err());

        let mut bad_feature = stump([1.0, 0.0], [0.0, 1.0]);
        bad_feature.feature[0] = FEATURE_COUNT as i64;
        assert!(bad_feature.validate().is_err());

        let mut short = stump([1.0, 0.0], [0.0, 1.0]);
        short.threshold.pop();
        assert!(short.validate().is_err());

        let mut empty_leaf = stump([1.0, 0.0], [0.0, 1.0]);
        empty_leaf.value[1] = [0.0, 0.0];
        assert!(empty_leaf.validate().is_err());

        assert!(RandomForest { trees: vec![] }.validate().is_err());
    }
}
