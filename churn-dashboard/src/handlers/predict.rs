//! Prediction handlers

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::Html,
    Form, Json,
};
use churn_core::PredictError;
use validator::Validate;

use crate::models::{describe_validation, PredictRequest, PredictResponse};
use crate::views::predict::{error_banner, render, result_banner};
use crate::{AppError, AppResult, AppState};

/// Predict form submission. Re-renders the form with the result banner.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<PredictRequest>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::debug!("Rejected predict form: {}", rejection.body_text());
            let banner = error_banner(&format!("Invalid input: {}", rejection.body_text()));
            return (
                rejection.status(),
                Html(render(&PredictRequest::default(), Some(&banner))),
            );
        }
    };

    if let Err(errors) = request.validate() {
        let banner = error_banner(&format!("Invalid input: {}", describe_validation(&errors)));
        return (StatusCode::BAD_REQUEST, Html(render(&request, Some(&banner))));
    }

    match state.predictor.predict(&request.to_record()) {
        Ok(prediction) => {
            tracing::info!(
                label = prediction.label.as_u8(),
                confidence = prediction.confidence,
                inference_time_us = prediction.inference_time_us,
                "Form prediction"
            );
            let banner = result_banner(prediction.label, &prediction.confidence_display());
            (StatusCode::OK, Html(render(&request, Some(&banner))))
        }
        Err(PredictError::InvalidInput(msg)) => {
            let banner = error_banner(&format!("Invalid input: {}", msg));
            (StatusCode::BAD_REQUEST, Html(render(&request, Some(&banner))))
        }
        Err(PredictError::Inference(msg)) => {
            tracing::error!("Inference error: {}", msg);
            let banner = error_banner("Prediction failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render(&request, Some(&banner))))
        }
    }
}

/// JSON prediction
pub async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    // ONNX sessions block while they run
    let predictor = state.predictor.clone();
    let record = request.to_record();
    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&record))
        .await
        .map_err(|e| AppError::InternalError(format!("prediction task failed: {}", e)))??;
    tracing::info!(
        label = prediction.label.as_u8(),
        confidence = prediction.confidence,
        inference_time_us = prediction.inference_time_us,
        "API prediction"
    );

    Ok(Json(PredictResponse::from(prediction)))
}
