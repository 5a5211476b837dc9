pub mod generation_task;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod views;
pub mod ws_handler;

// Re-export the handlers so the router below (and the binary) can reach them easily.
pub use middleware::require_premium;
pub use rest::{
    generate_script_handler, get_session_handler, list_plans_handler, list_scripts_handler,
    select_video_handler, set_captions_handler, set_plan_handler, set_topic_handler,
};
pub use ws_handler::ws_handler;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application router: session, scripts, pricing,
/// plan-gated editor routes, the WebSocket endpoint and Swagger UI.
pub fn app_router(app_state: Arc<AppState>) -> Router {
    // Premium routes (non-free plan required)
    let editor_routes = Router::new()
        .route("/editor/video", post(select_video_handler))
        .route("/editor/captions", put(set_captions_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_premium,
        ));

    let api_router = Router::new()
        .route("/session", get(get_session_handler))
        .route("/session/plan", put(set_plan_handler))
        .route("/session/topic", put(set_topic_handler))
        .route("/scripts", get(list_scripts_handler).post(generate_script_handler))
        .route("/plans", get(list_plans_handler))
        .route("/ws", get(ws_handler))
        .merge(editor_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
