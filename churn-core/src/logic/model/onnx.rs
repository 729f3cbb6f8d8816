//! ONNX Classifier - exported models through ONNX Runtime
//!
//! Expects a classifier exported with a float probability output of shape
//! `[1, 2]` (e.g. skl2onnx with `zipmap=False`).

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{ClassProbabilities, Classifier};
use super::error::{ArtifactError, PredictError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

pub struct OnnxClassifier {
    // Running a session needs &mut
    session: Mutex<Session>,
    probability_output: String,
}

impl OnnxClassifier {
    /// Build a session from model bytes
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ArtifactError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ArtifactError::Backend(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError::Backend(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ArtifactError::Backend(format!("Load from memory error: {}", e)))?;

        let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let probability_output = names
            .iter()
            .find(|n| n.to_ascii_lowercase().contains("prob"))
            .or_else(|| names.last())
            .cloned()
            .ok_or_else(|| ArtifactError::Backend("No output defined".to_string()))?;

        log::info!("ONNX probability output: {}", probability_output);

        Ok(Self {
            session: Mutex::new(session),
            probability_output,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn predict_proba(&self, x: &FeatureVector) -> Result<ClassProbabilities, PredictError> {
        let input_data: Vec<f32> = x.values.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input_data)
            .map_err(|e| PredictError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.probability_output)
            .ok_or_else(|| PredictError::Inference("No probability output".to_string()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::Inference(format!("Extract error: {}", e)))?;

        if data.len() < 2 {
            return Err(PredictError::Inference(format!(
                "expected 2 class probabilities, got {}",
                data.len()
            )));
        }

        ClassProbabilities::validated([f64::from(data[0]), f64::from(data[1])])
    }
}
