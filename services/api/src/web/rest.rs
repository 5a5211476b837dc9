//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    generation_task::generation_process,
    state::AppState,
    views::{
        CaptionOptionsView, FontSizeKey, PlanFeatureView, PlanOfferView, PositionKey,
        ScriptView, SessionView, UserView, VideoView,
    },
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use script_studio_core::{plan_catalog, GenerationOutcome, Plan, SessionError, VideoHandle};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_session_handler,
        set_plan_handler,
        set_topic_handler,
        list_scripts_handler,
        generate_script_handler,
        list_plans_handler,
        select_video_handler,
        set_captions_handler,
    ),
    components(
        schemas(
            SessionView, UserView, ScriptView, VideoView, CaptionOptionsView,
            FontSizeKey, PositionKey, PlanOfferView, PlanFeatureView,
            SetPlanRequest, SetTopicRequest, GenerateScriptRequest,
        )
    ),
    tags(
        (name = "Script Studio API", description = "Session, script generation and caption editor endpoints.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SetPlanRequest {
    /// One of `free`, `weekly`, `monthly`.
    pub plan: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetTopicRequest {
    pub topic: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateScriptRequest {
    /// Generates for this topic instead of the stored input. It replaces the
    /// input only when the generation is admitted.
    #[serde(default)]
    pub topic: Option<String>,
}

//=========================================================================================
// Error Mapping
//=========================================================================================

/// Maps a session rejection onto the HTTP status the client sees.
pub fn session_rejection(err: &SessionError) -> (StatusCode, String) {
    let status = match err {
        SessionError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        SessionError::GenerationInProgress => StatusCode::CONFLICT,
        SessionError::PremiumRequired { .. } => StatusCode::FORBIDDEN,
        SessionError::NoVideoSelected => StatusCode::CONFLICT,
        SessionError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// Read the current session: user, usage, generation status and editor selections.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session state", body = SessionView)
    )
)]
pub async fn get_session_handler(State(app_state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(app_state.snapshot().await)
}

/// Switch the session's plan. There is no payment step.
#[utoipa::path(
    put,
    path = "/session/plan",
    request_body = SetPlanRequest,
    responses(
        (status = 200, description = "Plan switched", body = SessionView),
        (status = 400, description = "Unknown plan")
    )
)]
pub async fn set_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SetPlanRequest>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let plan = req
        .plan
        .parse::<Plan>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(app_state.set_plan(plan).await))
}

/// Replace the topic input.
#[utoipa::path(
    put,
    path = "/session/topic",
    request_body = SetTopicRequest,
    responses(
        (status = 200, description = "Topic updated", body = SessionView)
    )
)]
pub async fn set_topic_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SetTopicRequest>,
) -> Json<SessionView> {
    Json(app_state.set_topic(req.topic).await)
}

//=========================================================================================
// Script Handlers
//=========================================================================================

/// List generated scripts, most recent first.
#[utoipa::path(
    get,
    path = "/scripts",
    responses(
        (status = 200, description = "Generated scripts", body = [ScriptView])
    )
)]
pub async fn list_scripts_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<ScriptView>> {
    let session = app_state.session.lock().await;
    Json(session.scripts().iter().map(ScriptView::from).collect())
}

/// Generate a script for the topic.
///
/// The body is optional; without one the stored topic input is used. The
/// request completes once the simulated generator finishes. While it runs,
/// `GET /session` reports `status: "pending"` and further generation requests
/// are refused with 409.
#[utoipa::path(
    post,
    path = "/scripts",
    request_body(content = GenerateScriptRequest, description = "Optional; omit the body to use the stored topic."),
    responses(
        (status = 201, description = "Script generated", body = ScriptView),
        (status = 204, description = "Topic was blank; nothing happened"),
        (status = 409, description = "Another generation is in progress"),
        (status = 429, description = "Script limit reached for the current plan"),
        (status = 500, description = "Generator failure")
    )
)]
pub async fn generate_script_handler(
    State(app_state): State<Arc<AppState>>,
    req: Option<Json<GenerateScriptRequest>>,
) -> Result<Response, (StatusCode, String)> {
    let topic = req.and_then(|Json(req)| req.topic);
    // Spawned so the generation still completes if the client goes away.
    let task = tokio::spawn(generation_process(app_state.clone(), topic));
    let outcome = task.await.map_err(|e| {
        error!("Generation task panicked: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate script".to_string(),
        )
    })?;

    match outcome {
        Ok(GenerationOutcome::Generated(script)) => {
            Ok((StatusCode::CREATED, Json(ScriptView::from(&script))).into_response())
        }
        Ok(GenerationOutcome::Skipped) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(session_rejection(&e)),
    }
}

//=========================================================================================
// Pricing Handlers
//=========================================================================================

/// The pricing table. The active plan is flagged with `current`.
#[utoipa::path(
    get,
    path = "/plans",
    responses(
        (status = 200, description = "Available plans", body = [PlanOfferView])
    )
)]
pub async fn list_plans_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<PlanOfferView>> {
    let current = app_state.session.lock().await.user().plan;
    Json(
        plan_catalog()
            .iter()
            .map(|offer| PlanOfferView::new(offer, offer.plan == current))
            .collect(),
    )
}

//=========================================================================================
// Caption Editor Handlers
//=========================================================================================

/// Choose the video to caption.
///
/// Accepts a multipart/form-data request with a single file part. Only the
/// file name and content type are recorded; the file's bytes are never read.
#[utoipa::path(
    post,
    path = "/editor/video",
    request_body(content_type = "multipart/form-data", description = "The video to caption."),
    responses(
        (status = 200, description = "Video selected", body = SessionView),
        (status = 400, description = "Missing file or not a video"),
        (status = 403, description = "The caption editor requires a premium plan")
    )
)]
pub async fn select_video_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart data: {}", e),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "Multipart form must include a file".to_string(),
            )
        })?;

    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "Multipart part must be a file".to_string(),
            )
        })?;
    let content_type = field.content_type().map(str::to_string);
    if let Some(ct) = &content_type {
        if !ct.starts_with("video/") {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Expected a video file, got '{}'", ct),
            ));
        }
    }

    let mut session = app_state.session.lock().await;
    session
        .select_video(VideoHandle {
            file_name: file_name.clone(),
            content_type,
        })
        .map_err(|e| {
            warn!("Video selection refused: {}", e);
            session_rejection(&e)
        })?;
    info!(file_name = %file_name, "Video selected for captioning.");
    Ok(Json(SessionView::from(&*session)))
}

/// Set caption text, font size and position for the selected video.
/// Nothing is rendered; the options are only stored.
#[utoipa::path(
    put,
    path = "/editor/captions",
    request_body = CaptionOptionsView,
    responses(
        (status = 200, description = "Caption options saved", body = SessionView),
        (status = 403, description = "The caption editor requires a premium plan"),
        (status = 409, description = "No video selected"),
        (status = 422, description = "Malformed caption options")
    )
)]
pub async fn set_captions_handler(
    State(app_state): State<Arc<AppState>>,
    Json(options): Json<CaptionOptionsView>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    let mut session = app_state.session.lock().await;
    session
        .set_caption_options(options.into())
        .map_err(|e| session_rejection(&e))?;
    Ok(Json(SessionView::from(&*session)))
}
