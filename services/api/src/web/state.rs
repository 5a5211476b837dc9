//! services/api/src/web/state.rs
//!
//! Defines the application's shared state, including the one in-memory session.

use crate::config::Config;
use crate::web::{protocol::ServerMessage, views::SessionView};
use script_studio_core::{ports::ScriptGenerationService, Plan, StudioSession, User};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::info;

/// Capacity of the event channel. Slow WebSocket clients that fall further
/// behind than this skip ahead.
const EVENT_CAPACITY: usize = 64;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn ScriptGenerationService>,
    /// The session lives only as long as the process.
    pub session: Arc<Mutex<StudioSession>>,
    pub events: broadcast::Sender<ServerMessage>,
}

impl AppState {
    /// Creates the state with a fresh session seeded from `config`.
    pub fn new(config: Arc<Config>, generator: Arc<dyn ScriptGenerationService>) -> Self {
        let user = User::new(config.initial_plan, config.initial_scripts_generated);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            generator,
            session: Arc::new(Mutex::new(StudioSession::new(user))),
            events,
        }
    }

    /// Sends an event to every connected WebSocket client. Having no
    /// subscribers is not an error.
    pub fn publish(&self, message: ServerMessage) {
        let _ = self.events.send(message);
    }

    pub async fn snapshot(&self) -> SessionView {
        SessionView::from(&*self.session.lock().await)
    }

    pub async fn set_plan(&self, plan: Plan) -> SessionView {
        let (previous, view) = {
            let mut session = self.session.lock().await;
            let previous = session.set_plan(plan);
            (previous, SessionView::from(&*session))
        };
        info!(%previous, %plan, "Plan changed.");
        self.publish(ServerMessage::PlanChanged {
            plan: plan.to_string(),
            previous: previous.to_string(),
        });
        view
    }

    pub async fn set_topic(&self, topic: String) -> SessionView {
        let view = {
            let mut session = self.session.lock().await;
            session.set_topic(topic.clone());
            SessionView::from(&*session)
        };
        self.publish(ServerMessage::TopicChanged { topic });
        view
    }
}
