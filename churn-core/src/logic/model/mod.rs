//! Model Module - Classifier Inference
//!
//! Artifact loading, normalization and the classifier call, kept apart from
//! feature encoding so the model can be swapped without touching the form.

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod inference;
pub mod normalization;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use artifact::{ArtifactInfo, ArtifactPaths, ClassifierArtifact};
pub use classifier::{ChurnLabel, ClassProbabilities, Classifier, DecisionTree, LogisticRegression, RandomForest};
pub use error::{ArtifactError, PredictError};
pub use inference::{format_confidence, ChurnPrediction, EngineStatus, ModelMetadata, Predictor};
pub use normalization::{NormalizationRecord, NormalizationTable};
