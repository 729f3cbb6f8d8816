//! Logic Module - Encoding & Inference Engines
//!
//! - `features/` - Feature encoding (record → ordered vector, layout)
//! - `model/` - Artifact loading, normalization, classifier inference

pub mod features;
pub mod model;
