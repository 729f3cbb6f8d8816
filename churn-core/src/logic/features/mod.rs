//! Features Module - Feature Encoding
//!
//! Turns one customer record into the ordered numeric vector the classifier
//! was trained on. Column order lives in `layout.rs` only.

pub mod layout;
pub mod record;
pub mod vector;


// Re-export common types
pub use layout::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use record::{ContractLength, FeatureRecord, Gender, SubscriptionType, UnknownCategory};
pub use vector::FeatureVector;
