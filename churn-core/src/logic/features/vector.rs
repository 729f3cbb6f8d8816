//! Feature Vector - Core data structure for classifier input
//!
//! Versioned feature vector. Uses the centralized layout from `layout.rs`
//! for column order, version and layout hash.

use std::collections::BTreeMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Copy into an ndarray vector
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.values.to_vec())
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Position of the first NaN/inf value
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// Column name → value, for API responses
    pub fn named_values(&self) -> BTreeMap<&'static str, f64> {
        FEATURE_LAYOUT
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_carries_layout() {
        let vector = FeatureVector::from_values([0.0; FEATURE_COUNT]);
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
    }

    #[test]
    fn test_get_by_name() {
        let mut values = [0.0; FEATURE_COUNT];
        values[4] = 7.0;
        let vector: FeatureVector = values.into();

        assert_eq!(vector.get_by_name("support_calls"), Some(7.0));
        assert_eq!(vector.get_by_name("churn"), None);
        assert_eq!(vector.get(FEATURE_COUNT), None);
    }

    #[test]
    fn test_first_non_finite() {
        let mut values = [1.0; FEATURE_COUNT];
        assert_eq!(FeatureVector::from_values(values).first_non_finite(), None);

        values[8] = f64::NAN;
        assert_eq!(FeatureVector::from_values(values).first_non_finite(), Some(8));
    }

    #[test]
    fn test_named_values() {
        let vector = FeatureVector::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let named = vector.named_values();

        assert_eq!(named.len(), FEATURE_COUNT);
        assert_eq!(named["age"], 1.0);
        assert_eq!(named["last_interaction"], 10.0);
    }

    #[test]
    fn test_to_array() {
        let vector = FeatureVector::from_values([2.0; FEATURE_COUNT]);
        let array = vector.to_array();
        assert_eq!(array.len(), FEATURE_COUNT);
        assert_eq!(array.sum(), 20.0);
    }
}
