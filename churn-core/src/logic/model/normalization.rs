//! Normalization Table - per-column mean / standard deviation
//!
//! Standardizes an encoded vector with the statistics computed on the
//! training set: `(value - mean[i]) / std[i]`.

use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, PredictError};
use crate::logic::features::layout::{feature_name, validate_columns};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

const ARTIFACT: &str = "normalization table";

/// On-disk form of the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationRecord {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// Column names the statistics were computed over, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

/// Validated, immutable normalization statistics
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationTable {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl NormalizationTable {
    /// Build a table, rejecting wrong lengths, non-finite values and zero std
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.len() != FEATURE_COUNT {
            return Err(ArtifactError::invalid(
                ARTIFACT,
                format!("mean has {} entries, expected {}", mean.len(), FEATURE_COUNT),
            ));
        }
        if std.len() != FEATURE_COUNT {
            return Err(ArtifactError::invalid(
                ARTIFACT,
                format!("std has {} entries, expected {}", std.len(), FEATURE_COUNT),
            ));
        }

        for (i, (&m, &s)) in mean.iter().zip(std.iter()).enumerate() {
            let column = feature_name(i).unwrap_or("?");
            if !m.is_finite() {
                return Err(ArtifactError::invalid(
                    ARTIFACT,
                    format!("mean of `{}` is not finite", column),
                ));
            }
            if !s.is_finite() || s == 0.0 {
                return Err(ArtifactError::invalid(
                    ARTIFACT,
                    format!("std of `{}` must be finite and non-zero, got {}", column, s),
                ));
            }
        }

        Ok(Self {
            mean: Array1::from(mean),
            std: Array1::from(std),
        })
    }

    /// Validate a deserialized record, including its optional column list
    pub fn from_record(record: NormalizationRecord) -> Result<Self, ArtifactError> {
        if let Some(names) = &record.feature_names {
            validate_columns(names.as_slice())?;
        }
        Self::new(record.mean, record.std)
    }

    /// Load a JSON record from disk
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes, path)
    }

    /// Parse and validate a JSON record already read from `path`
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ArtifactError> {
        let record: NormalizationRecord =
            serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Self::from_record(record)?;
        log::info!("Normalization table loaded from {}", path.display());
        Ok(table)
    }

    pub fn mean(&self) -> &[f64] {
        self.mean.as_slice().unwrap_or(&[])
    }

    pub fn std(&self) -> &[f64] {
        self.std.as_slice().unwrap_or(&[])
    }

    /// Standardize an encoded vector
    pub fn normalize(&self, raw: &FeatureVector) -> Result<FeatureVector, PredictError> {
        if let Some(i) = raw.first_non_finite() {
            return Err(PredictError::InvalidInput(format!(
                "`{}` is not a finite number",
                feature_name(i).unwrap_or("?")
            )));
        }

        let normalized = (raw.to_array() - &self.mean) / &self.std;

        let mut values = [0.0f64; FEATURE_COUNT];
        for (slot, v) in values.iter_mut().zip(normalized.iter()) {
            *slot = *v;
        }

        let vector = FeatureVector::from_values(values);
        if let Some(i) = vector.first_non_finite() {
            return Err(PredictError::InvalidInput(format!(
                "`{}` is out of range after normalization",
                feature_name(i).unwrap_or("?")
            )));
        }

        Ok(vector)
    }
}
