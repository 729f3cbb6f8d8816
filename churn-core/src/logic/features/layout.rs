//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the encoded column order**
//!
//! The classifier and the normalization table were both fitted against this
//! exact column order. Nothing in a serialized model records it, so this list
//! is the only place the order lives.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the encoded vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "age",               // 0: Age in years
    "gender",            // 1: Male=1, Female=0
    "tenure",            // 2: Months as a customer
    "usage_frequency",   // 3: Uses in the last month
    "support_calls",     // 4: Support calls in the last month
    "payment_delay",     // 5: Days of payment delay
    "subscription_type", // 6: Standard=2, Premium=1, Basic=0
    "contract_length",   // 7: Monthly=1, Annual=0, Quarterly=2
    "total_spend",       // 8: Total amount spent
    "last_interaction",  // 9: Days since last interaction
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 10;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when an artifact's column list doesn't match the layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Feature layout mismatch at column {position}: expected `{expected}`, got `{actual}`")]
pub struct LayoutMismatchError {
    pub position: usize,
    pub expected: String,
    pub actual: String,
}

/// Validate a column list (as stored next to training statistics) against the layout.
///
/// Column names are compared after lowercasing and folding spaces/dashes to
/// underscores, so `"Usage Frequency"` matches `usage_frequency`.
pub fn validate_columns<S: AsRef<str>>(columns: &[S]) -> Result<(), LayoutMismatchError> {
    if columns.len() != FEATURE_COUNT {
        let position = columns.len().min(FEATURE_COUNT);
        return Err(LayoutMismatchError {
            position,
            expected: feature_name(position).unwrap_or("<end>").to_string(),
            actual: columns
                .get(position)
                .map(|c| c.as_ref().to_string())
                .unwrap_or_else(|| "<end>".to_string()),
        });
    }

    for (position, (column, expected)) in columns.iter().zip(FEATURE_LAYOUT).enumerate() {
        if canonical_column(column.as_ref()) != *expected {
            return Err(LayoutMismatchError {
                position,
                expected: expected.to_string(),
                actual: column.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

fn canonical_column(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
