//! Customer Churn Dashboard
//!
//! Serves the three views of the churn app and a JSON prediction API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CUSTOMER CHURN                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Views    │  │  JSON API │  │  Static assets          │ │
//! │  │  (HTML)   │  │  (Axum)   │  │  (charts, headers)      │ │
//! │  └─────┬─────┘  └─────┬─────┘  └─────────────────────────┘ │
//! │        └──────────────┤                                     │
//! │                       ▼                                     │
//! │                ┌─────────────┐                              │
//! │                │  Predictor  │  encode → normalize → model  │
//! │                └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod views;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use churn_core::Predictor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "churn_dashboard=debug,churn_core=info,tower_http=debug".into()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Customer Churn dashboard starting...");
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Normalization: {}", config.normalization_path.display());

    // Artifacts are required; a missing or malformed one stops startup
    let predictor = Predictor::load(&config.artifact_paths())
        .with_context(|| format!("Failed to load model artifacts from {}", config.model_path.display()))?;
    tracing::info!("Loaded {} classifier", predictor.metadata().model_kind);

    // Build application state
    let state = AppState {
        predictor: Arc::new(predictor),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Views
    let page_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/home") }))
        .route("/home", get(handlers::pages::home))
        .route("/insights", get(handlers::pages::insights))
        .route(
            "/predict",
            get(handlers::pages::predict_form).post(handlers::predict::submit),
        );

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict_json))
        .route("/api/v1/model", get(handlers::model::status));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .nest_service("/static", ServeDir::new(&state.config.assets_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
