//! Page handlers

use axum::response::Html;

use crate::models::PredictRequest;
use crate::views;

pub async fn home() -> Html<String> {
    Html(views::home::render())
}

pub async fn insights() -> Html<String> {
    Html(views::insights::render())
}

/// Empty form with default values
pub async fn predict_form() -> Html<String> {
    Html(views::predict::render(&PredictRequest::default(), None))
}
