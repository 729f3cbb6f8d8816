//! Inference - encode → normalize → classify for one customer
//!
//! `Predictor` owns the loaded classifier and normalization table. It is
//! built once at startup and shared read-only; the only mutable state is
//! the pair of latency counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::artifact::{load_classifier, load_normalization, ArtifactInfo, ArtifactPaths};
use super::classifier::{ChurnLabel, ClassProbabilities, Classifier};
use super::error::{ArtifactError, PredictError};
use super::normalization::NormalizationTable;
use crate::logic::features::{FeatureRecord, FeatureVector, LayoutInfo};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnPrediction {
    pub label: ChurnLabel,
    pub probabilities: ClassProbabilities,
    /// Probability mass of the predicted class
    pub confidence: f64,
    pub encoded: FeatureVector,
    pub normalized: FeatureVector,
    pub inference_time_us: u64,
}

impl ChurnPrediction {
    pub fn confidence_percent(&self) -> f64 {
        truncate_percent(self.confidence)
    }

    pub fn confidence_display(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// Probability as a percentage truncated (not rounded) to two decimals
pub fn truncate_percent(probability: f64) -> f64 {
    (probability * 10000.0).floor() / 100.0
}

/// `0.91234` → `"91.23%"`
pub fn format_confidence(probability: f64) -> String {
    format!("{:.2}%", truncate_percent(probability))
}

/// Where the running model came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_kind: String,
    pub layout: LayoutInfo,
    pub classifier_artifact: Option<ArtifactInfo>,
    pub normalization_artifact: Option<ArtifactInfo>,
}

/// Engine status for the model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub metadata: ModelMetadata,
    pub normalization_mean: Vec<f64>,
    pub normalization_std: Vec<f64>,
    pub inference_count: u64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Default)]
struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

impl InferenceStats {
    fn record(&self, micros: u64) {
        self.latency_sum_us.fetch_add(micros, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> (u64, f64) {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.count.load(Ordering::Relaxed);
        let avg_ms = if count > 0 {
            (sum as f64 / count as f64) / 1000.0
        } else {
            0.0
        };
        (count, avg_ms)
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct Predictor {
    classifier: Box<dyn Classifier>,
    normalization: NormalizationTable,
    metadata: ModelMetadata,
    stats: InferenceStats,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model_kind", &self.metadata.model_kind)
            .field("normalization", &self.normalization)
            .finish()
    }
}

impl Predictor {
    /// Wrap an in-memory classifier and table
    pub fn new(classifier: Box<dyn Classifier>, normalization: NormalizationTable) -> Self {
        let metadata = ModelMetadata {
            model_kind: classifier.kind().to_string(),
            layout: LayoutInfo::current(),
            classifier_artifact: None,
            normalization_artifact: None,
        };

        Self {
            classifier,
            normalization,
            metadata,
            stats: InferenceStats::default(),
        }
    }

    /// Load both artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let (classifier, classifier_info) = load_classifier(&paths.model)?;
        let (normalization, normalization_info) = load_normalization(&paths.normalization)?;

        let mut predictor = Self::new(classifier, normalization);
        predictor.metadata.classifier_artifact = Some(classifier_info);
        predictor.metadata.normalization_artifact = Some(normalization_info);
        Ok(predictor)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Score one customer
    pub fn predict(&self, record: &FeatureRecord) -> Result<ChurnPrediction, PredictError> {
        let start_time = Instant::now();

        let encoded = record.encode();
        let normalized = self.normalization.normalize(&encoded)?;

        let label = self.classifier.predict(&normalized)?;
        let probabilities = self.classifier.predict_proba(&normalized)?;
        let confidence = probabilities.of(label);

        let inference_time_us = start_time.elapsed().as_micros() as u64;
        self.stats.record(inference_time_us);

        Ok(ChurnPrediction {
            label,
            probabilities,
            confidence,
            encoded,
            normalized,
            inference_time_us,
        })
    }

    pub fn status(&self) -> EngineStatus {
        let (inference_count, avg_latency_ms) = self.stats.snapshot();

        EngineStatus {
            model_loaded: true,
            metadata: self.metadata.clone(),
            normalization_mean: self.normalization.mean().to_vec(),
            normalization_std: self.normalization.std().to_vec(),
            inference_count,
            avg_latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{ContractLength, Gender, SubscriptionType, FEATURE_COUNT};
    use crate::logic::model::classifier::LogisticRegression;

    /// Identity normalization, churn driven by support calls
    fn predictor() -> Predictor {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[4] = 1.0;
        let model = LogisticRegression { coefficients, intercept: -5.0 };
        let table = NormalizationTable::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        Predictor::new(Box::new(model), table)
    }

    /// Always returns the same probabilities
    struct Fixed([f64; 2]);

    impl Classifier for Fixed {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        fn predict_proba(&self, _x: &FeatureVector) -> Result<ClassProbabilities, PredictError> {
            ClassProbabilities::validated(self.0)
        }
    }

    fn fixed(pair: [f64; 2]) -> Predictor {
        let table = NormalizationTable::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        Predictor::new(Box::new(Fixed(pair)), table)
    }

    #[test]
    fn test_confidence_truncates() {
        assert_eq!(format_confidence(0.91234), "91.23%");
        assert_eq!(format_confidence(0.99999), "99.99%");
        assert_eq!(format_confidence(0.5), "50.00%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(truncate_percent(0.91239), 91.23);
    }

    #[test]
    fn test_confidence_is_mass_of_predicted_class() {
        let churned = fixed([0.08766, 0.91234]).predict(&FeatureRecord::default()).unwrap();
        assert_eq!(churned.label, ChurnLabel::Churned);
        assert_eq!(churned.confidence, 0.91234);
        assert_eq!(churned.confidence_display(), "91.23%");

        let stays = fixed([0.75, 0.25]).predict(&FeatureRecord::default()).unwrap();
        assert_eq!(stays.label, ChurnLabel::NotChurned);
        assert_eq!(stays.confidence, 0.75);
        assert_eq!(stays.confidence_percent(), 75.0);
    }

    #[test]
    fn test_end_to_end_support_calls() {
        let p = predictor();

        let calm = FeatureRecord { support_calls: 1, ..FeatureRecord::default() };
        let prediction = p.predict(&calm).unwrap();
        assert_eq!(prediction.label, ChurnLabel::NotChurned);
        assert!(prediction.confidence > 0.98);

        let angry = FeatureRecord {
            support_calls: 10,
            gender: Gender::Female,
            subscription_type: SubscriptionType::Basic,
            contract_length: ContractLength::Annual,
            ..FeatureRecord::default()
        };
        let prediction = p.predict(&angry).unwrap();
        assert_eq!(prediction.label, ChurnLabel::Churned);
        assert_eq!(prediction.encoded.values[4], 10.0);
        assert_eq!(prediction.encoded.values[1], 0.0);
    }

    #[test]
    fn test_prediction_carries_vectors() {
        let prediction = predictor().predict(&FeatureRecord::default()).unwrap();
        assert_eq!(
            prediction.encoded.values,
            [30.0, 1.0, 12.0, 10.0, 3.0, 5.0, 2.0, 1.0, 500.0, 20.0]
        );
        // Identity table
        assert_eq!(prediction.normalized.values, prediction.encoded.values);
    }

    #[test]
    fn test_non_finite_spend_is_invalid_input() {
        let record = FeatureRecord { total_spend: f64::NAN, ..FeatureRecord::default() };
        let err = predictor().predict(&record).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }

    #[test]
    fn test_broken_classifier_is_inference_error() {
        let err = fixed([f64::NAN, 0.5]).predict(&FeatureRecord::default()).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
    }

    #[test]
    fn test_status_counts_predictions() {
        let p = predictor();
        assert_eq!(p.status().inference_count, 0);

        for _ in 0..3 {
            p.predict(&FeatureRecord::default()).unwrap();
        }

        let status = p.status();
        assert_eq!(status.inference_count, 3);
        assert_eq!(status.metadata.model_kind, "logistic_regression");
        assert_eq!(status.normalization_std, vec![1.0; FEATURE_COUNT]);
        assert!(status.metadata.classifier_artifact.is_none());
    }

    #[test]
    fn test_load_from_paths() {
        use std::io::Write;

        let mut model = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            model,
            r#"{{"kind": "logistic_regression", "coefficients": [0,0,0,0,1,0,0,0,0,0], "intercept": -5}}"#
        )
        .unwrap();
        let mut table = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            table,
            r#"{{"mean": [0,0,0,0,0,0,0,0,0,0], "std": [1,1,1,1,1,1,1,1,1,1]}}"#
        )
        .unwrap();

        let p = Predictor::load(&ArtifactPaths {
            model: model.path().to_path_buf(),
            normalization: table.path().to_path_buf(),
        })
        .unwrap();

        assert!(p.metadata().classifier_artifact.is_some());
        assert!(p.metadata().normalization_artifact.is_some());
        assert_eq!(p.predict(&FeatureRecord::default()).unwrap().label, ChurnLabel::NotChurned);
    }
}
