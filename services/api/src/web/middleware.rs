//! services/api/src/web/middleware.rs
//!
//! Plan gating middleware for the premium caption editor routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use script_studio_core::SessionError;
use std::sync::Arc;
use tracing::warn;

use crate::web::state::AppState;

/// Middleware that rejects editor requests while the session is on the free plan.
///
/// The session re-checks the plan itself; this layer just turns the request
/// away before any multipart body is touched.
pub async fn require_premium(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let plan = state.session.lock().await.user().plan;

    if !plan.includes_video_editor() {
        warn!(%plan, path = %req.uri().path(), "Editor request on a plan without the editor.");
        return Err((
            StatusCode::FORBIDDEN,
            SessionError::PremiumRequired { plan }.to_string(),
        ));
    }

    Ok(next.run(req).await)
}
