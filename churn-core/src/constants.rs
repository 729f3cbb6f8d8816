//! Central Configuration Constants
//!
//! Single source of truth for artifact locations and form limits.

/// Default classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";

/// Default normalization record
pub const DEFAULT_NORMALIZATION_PATH: &str = "artifacts/mean_std_values.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Customer Churn";

// ============================================
// Predict form limits (inclusive)
// ============================================

pub const AGE_MAX: u32 = 120;
pub const TENURE_MAX: u32 = 100;
pub const USAGE_FREQUENCY_MAX: u32 = 100;
pub const SUPPORT_CALLS_MAX: u32 = 50;
pub const PAYMENT_DELAY_MAX: u32 = 100;
pub const LAST_INTERACTION_MAX: u32 = 100;
pub const TOTAL_SPEND_STEP: f64 = 0.1;
