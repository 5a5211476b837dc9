//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server.

use crate::web::views::{ScriptView, SessionView};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Replaces the topic input.
    SetTopic { topic: String },

    /// Switches the session's plan. No payment flow is involved.
    SetPlan { plan: String },

    /// Starts a generation. A `topic` here is used instead of the stored input and
    /// replaces it only if the generation is admitted.
    /// The result is reported through events, not as a direct reply.
    GenerateScript {
        #[serde(default)]
        topic: Option<String>,
    },
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
/// All connected clients receive every session event.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full session state, sent once right after the connection opens.
    SessionSnapshot { session: SessionView },

    /// The session entered the pending state. The UI should disable its trigger.
    GenerationStarted { topic: String },

    /// A script was added at the front of the list and the session is idle again.
    ScriptGenerated {
        script: ScriptView,
        scripts_generated: u32,
    },

    /// The topic was blank, so nothing happened.
    GenerationSkipped,

    /// The plan's quota is used up. The UI should show a blocking notice.
    QuotaExceeded {
        plan: String,
        limit: u32,
        message: String,
    },

    /// A generation was refused because another one is in flight.
    GenerationRejected { message: String },

    /// The generator failed; the session is idle again and unchanged.
    GenerationFailed { message: String },

    PlanChanged { plan: String, previous: String },

    TopicChanged { topic: String },

    /// Reports a problem with a message this client sent.
    Error { message: String },
}
