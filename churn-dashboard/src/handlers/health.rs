//! Health check handler

use axum::{extract::State, Json};
use churn_core::constants::{APP_NAME, APP_VERSION};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    model_kind: String,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        app: APP_NAME,
        version: APP_VERSION,
        model_kind: state.predictor.metadata().model_kind.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
