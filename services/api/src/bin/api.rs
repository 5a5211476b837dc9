//! services/api/src/bin/api.rs

use api_lib::{
    adapters::SimulatedScriptAdapter,
    config::Config,
    error::ApiError,
    web::{app_router, state::AppState},
};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, Method};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Script Generator ---
    info!(
        delay_ms = config.generation_delay.as_millis() as u64,
        "Using the simulated script generator."
    );
    let generator = Arc::new(SimulatedScriptAdapter::new(config.generation_delay));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), generator));
    info!(
        plan = %config.initial_plan,
        scripts_generated = config.initial_scripts_generated,
        "Session initialized."
    );

    // --- 4. Create the Web Router ---
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let app = app_router(app_state).layer(cors);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
