//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use churn_core::PredictError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Input errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    // Model errors
    #[error("inference failed: {0}")]
    InferenceError(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, format!("Invalid input: {}", msg)),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, format!("Invalid input: {}", msg)),
            AppError::InferenceError(msg) => {
                tracing::error!("Inference error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::InvalidInput(msg) => AppError::InvalidInput(msg),
            PredictError::Inference(msg) => AppError::InferenceError(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(crate::models::describe_validation(&err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
