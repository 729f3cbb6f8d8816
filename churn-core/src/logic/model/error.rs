//! Model errors

use std::path::PathBuf;

use crate::logic::features::LayoutMismatchError;

/// Failure while loading a classifier or normalization artifact
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {artifact}: {reason}")]
    Invalid { artifact: &'static str, reason: String },

    #[error("normalization columns do not match the feature layout: {0}")]
    Layout(#[from] LayoutMismatchError),

    #[error("unsupported classifier format for {0}")]
    UnsupportedFormat(PathBuf),

    #[error("classifier backend error: {0}")]
    Backend(String),
}

impl ArtifactError {
    pub(crate) fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}

/// Failure while turning one record into a prediction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// The record cannot be scored as given
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classifier itself failed or returned garbage
    #[error("inference failed: {0}")]
    Inference(String),
}
