//! services/api/src/web/generation_task.rs
//!
//! This module contains the asynchronous "worker" function that drives a
//! single script generation from admission to completion.

use crate::web::{
    protocol::ServerMessage,
    state::AppState,
    views::ScriptView,
};
use script_studio_core::{GenerationOutcome, SessionError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs one generation for the session's topic.
///
/// When `topic` is given it is checked in place of the topic input, and it
/// replaces the input only once the generation is admitted. A skipped or
/// refused request leaves the session untouched. The session lock is held
/// only to admit and to record the result, so the session reads as pending
/// while the generator runs. Every outcome is also published as a
/// [`ServerMessage`].
pub async fn generation_process(
    app_state: Arc<AppState>,
    topic: Option<String>,
) -> Result<GenerationOutcome, SessionError> {
    let admitted = app_state
        .session
        .lock()
        .await
        .begin_generation(topic.as_deref());

    let ticket = match admitted {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            info!("Generation skipped: topic is blank.");
            app_state.publish(ServerMessage::GenerationSkipped);
            return Ok(GenerationOutcome::Skipped);
        }
        Err(e) => {
            warn!("Generation refused: {}", e);
            let message = match &e {
                SessionError::QuotaExceeded { plan, limit } => ServerMessage::QuotaExceeded {
                    plan: plan.to_string(),
                    limit: *limit,
                    message: e.to_string(),
                },
                _ => ServerMessage::GenerationRejected {
                    message: e.to_string(),
                },
            };
            app_state.publish(message);
            return Err(e);
        }
    };

    let start_time = Instant::now();
    info!(topic = ticket.topic(), "Generation started.");
    if topic.is_some() {
        app_state.publish(ServerMessage::TopicChanged {
            topic: ticket.topic().to_string(),
        });
    }
    app_state.publish(ServerMessage::GenerationStarted {
        topic: ticket.topic().to_string(),
    });

    let generated = app_state.generator.generate_script(ticket.topic()).await;

    let mut session = app_state.session.lock().await;
    match generated {
        Ok(script) => {
            let stored = session.complete_generation(ticket, script).clone();
            let scripts_generated = session.user().scripts_generated;
            drop(session);

            info!(
                script_id = %stored.id,
                scripts_generated,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Script generated."
            );
            app_state.publish(ServerMessage::ScriptGenerated {
                script: ScriptView::from(&stored),
                scripts_generated,
            });
            Ok(GenerationOutcome::Generated(stored))
        }
        Err(e) => {
            session.abort_generation(ticket);
            drop(session);

            error!("Script generator failed: {:?}", e);
            app_state.publish(ServerMessage::GenerationFailed {
                message: e.to_string(),
            });
            Err(SessionError::Generation(e))
        }
    }
}
