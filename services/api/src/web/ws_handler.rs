//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! It forwards session events to the client and dispatches client commands.

use crate::web::{
    generation_task::generation_process,
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    Sink, SinkExt,
};
use script_studio_core::Plan;
use std::sync::Arc;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    Mutex,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();
    info!(%connection_id, "New WebSocket connection established.");

    // The sender is wrapped in an Arc<Mutex<>> so the event forwarder and the
    // command loop can both write to it.
    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));

    // Subscribe before taking the snapshot so no event falls in between.
    let events = app_state.events.subscribe();

    // --- 1. Initial Snapshot ---
    let snapshot = ServerMessage::SessionSnapshot {
        session: app_state.snapshot().await,
    };
    if send_message(&ws_sender, &snapshot).await.is_err() {
        error!(%connection_id, "Failed to send session snapshot.");
        return;
    }

    // --- 2. Event Forwarder ---
    let cancellation_token = CancellationToken::new();
    let forwarder = tokio::spawn(forward_events(
        events,
        ws_sender.clone(),
        cancellation_token.clone(),
        connection_id,
    ));

    // --- 3. Main Message Loop ---
    loop {
        match receiver.next().await {
            Some(Ok(Message::Text(text))) => {
                handle_text_message(text.as_str(), &app_state, &ws_sender).await;
            }
            Some(Ok(Message::Close(_))) => {
                info!(%connection_id, "Client sent close message.");
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!(%connection_id, "WebSocket receive error: {}", e);
                break;
            }
            None => {
                info!(%connection_id, "Client disconnected.");
                break;
            }
        }
    }

    // --- 4. Cleanup ---
    cancellation_token.cancel();
    if let Err(e) = forwarder.await {
        error!(%connection_id, "Event forwarder ended abnormally: {:?}", e);
    }
    info!(%connection_id, "WebSocket connection closed.");
}

/// Relays session events to one client until `token` is cancelled, the
/// channel closes or the client stops accepting messages.
async fn forward_events<S>(
    mut events: broadcast::Receiver<ServerMessage>,
    sink: Arc<Mutex<S>>,
    token: CancellationToken,
    connection_id: Uuid,
) where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            received = events.recv() => match received {
                Ok(message) => {
                    if send_message(&sink, &message).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%connection_id, skipped, "WebSocket client lagging; events dropped.");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}

/// Serializes and sends one message. Fails when the client is gone.
async fn send_message<S>(sink: &Arc<Mutex<S>>, message: &ServerMessage) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(message).map_err(axum::Error::new)?;
    sink.lock().await.send(Message::Text(json.into())).await
}

/// Sends the direct reply to a client message, if there is one.
async fn handle_text_message(text: &str, app_state: &Arc<AppState>, ws_sender: &WsSender) {
    if let Some(reply) = dispatch_client_message(text, app_state).await {
        let _ = send_message(ws_sender, &reply).await;
    }
}

/// Applies one client message to the session.
///
/// Returns the reply meant only for the sender. Effects that every client
/// should see are published on the event channel instead.
pub async fn dispatch_client_message(text: &str, app_state: &Arc<AppState>) -> Option<ServerMessage> {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Failed to deserialize client message: {}", e);
            return Some(ServerMessage::Error {
                message: format!("Unrecognized message: {}", e),
            });
        }
    };

    match client_msg {
        ClientMessage::SetTopic { topic } => {
            app_state.set_topic(topic).await;
            None
        }
        ClientMessage::SetPlan { plan } => match plan.parse::<Plan>() {
            Ok(plan) => {
                app_state.set_plan(plan).await;
                None
            }
            Err(e) => Some(ServerMessage::Error {
                message: e.to_string(),
            }),
        },
        ClientMessage::GenerateScript { topic } => {
            info!("GenerateScript message received.");
            // Results reach every client through the event channel.
            let app_state = app_state.clone();
            tokio::spawn(async move {
                if let Err(e) = generation_process(app_state, topic).await {
                    info!("Generation ended without a script: {}", e);
                }
            });
            None
        }
    }
}
