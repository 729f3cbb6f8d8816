//! Configuration module

use std::env;
use std::path::PathBuf;

use churn_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_NORMALIZATION_PATH};
use churn_core::ArtifactPaths;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Serialized classifier
    pub model_path: PathBuf,

    /// Serialized mean/std record
    pub normalization_path: PathBuf,

    /// Directory served under /static (chart images)
    pub assets_dir: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
                .into(),

            normalization_path: env::var("NORMALIZATION_PATH")
                .unwrap_or_else(|_| DEFAULT_NORMALIZATION_PATH.to_string())
                .into(),

            assets_dir: env::var("ASSETS_DIR")
                .unwrap_or_else(|_| "assets".to_string())
                .into(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            normalization: self.normalization_path.clone(),
        }
    }
}
