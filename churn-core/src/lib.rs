//! Customer Churn Core
//!
//! Everything between a filled-in Predict form and a churn verdict:
//!
//! ```text
//! FeatureRecord ──encode──▶ FeatureVector ──normalize──▶ FeatureVector ──classify──▶ ChurnPrediction
//!                           (layout order)   (mean/std table)            (label + confidence)
//! ```
//!
//! The classifier and normalization table are loaded once into a
//! [`Predictor`] and shared read-only.

pub mod constants;
pub mod logic;

pub use logic::features::{
    ContractLength, FeatureRecord, FeatureVector, Gender, LayoutInfo, SubscriptionType,
    FEATURE_COUNT, FEATURE_LAYOUT,
};
pub use logic::model::{
    format_confidence, ArtifactError, ArtifactPaths, ChurnLabel, ChurnPrediction, Classifier,
    EngineStatus, LogisticRegression, NormalizationTable, PredictError, Predictor, RandomForest,
};
