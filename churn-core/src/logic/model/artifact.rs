//! Artifact Loader
//!
//! Reads the classifier and normalization files once at startup and
//! fingerprints them so the running model can be identified later.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, LogisticRegression, RandomForest};
use super::error::ArtifactError;
use super::normalization::NormalizationTable;

/// Serialized native classifier, tagged by model family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ClassifierArtifact {
    /// Validate structure and hand back the runnable classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        match self {
            ClassifierArtifact::LogisticRegression(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ClassifierArtifact::RandomForest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

/// Where an artifact came from and what it hashed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub sha256: String,
    pub size_bytes: u64,
    pub loaded_at: DateTime<Utc>,
}

impl ArtifactInfo {
    fn fingerprint(path: &Path, bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);

        Self {
            path: path.display().to_string(),
            sha256: hex::encode(hasher.finalize()),
            size_bytes: bytes.len() as u64,
            loaded_at: Utc::now(),
        }
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Load a classifier file: `.json` native models, `.onnx` with the `onnx` feature
pub fn load_classifier(path: &Path) -> Result<(Box<dyn Classifier>, ArtifactInfo), ArtifactError> {
    log::info!("Loading classifier from: {}", path.display());

    let bytes = read_artifact(path)?;
    let info = ArtifactInfo::fingerprint(path, &bytes);

    let classifier = if has_extension(path, "json") {
        let artifact: ClassifierArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.into_classifier()?
    } else if has_extension(path, "onnx") {
        load_onnx(&bytes, path)?
    } else {
        return Err(ArtifactError::UnsupportedFormat(path.to_path_buf()));
    };

    log::info!(
        "Classifier loaded: {} (sha256 {})",
        classifier.kind(),
        &info.sha256[..12]
    );

    Ok((classifier, info))
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8], _path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    Ok(Box::new(super::onnx::OnnxClassifier::from_bytes(bytes)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8], path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    log::warn!("ONNX classifier given but the `onnx` feature is disabled");
    Err(ArtifactError::UnsupportedFormat(path.to_path_buf()))
}

/// Load the normalization table and fingerprint it
pub fn load_normalization(path: &Path) -> Result<(NormalizationTable, ArtifactInfo), ArtifactError> {
    let bytes = read_artifact(path)?;
    let info = ArtifactInfo::fingerprint(path, &bytes);
    let table = NormalizationTable::from_slice(&bytes, path)?;
    Ok((table, info))
}

/// Paths of the two startup artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub normalization: PathBuf,
}
