//! services/api/src/adapters/simulated.rs
//!
//! This module contains the stand-in script generator. It implements the
//! `ScriptGenerationService` port from the `core` crate without calling any
//! model: it waits a fixed delay, then fills the script template with hooks
//! picked at random.

use async_trait::async_trait;
use chrono::Local;
use rand::Rng;
use script_studio_core::{
    domain::Script,
    ports::{PortResult, ScriptGenerationService},
    template::{compose_script, HOOKS},
};
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ScriptGenerationService` with a fixed-latency simulation.
#[derive(Clone, Debug)]
pub struct SimulatedScriptAdapter {
    delay: Duration,
}

impl SimulatedScriptAdapter {
    /// Creates a new `SimulatedScriptAdapter` that takes `delay` per script.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

fn random_hook() -> &'static str {
    HOOKS[rand::rng().random_range(0..HOOKS.len())]
}

//=========================================================================================
// `ScriptGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScriptGenerationService for SimulatedScriptAdapter {
    async fn generate_script(&self, topic: &str) -> PortResult<Script> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        // Two separate draws: the hook stored on the script is not necessarily
        // the one embedded in its content.
        let content_hook = random_hook();
        let hook = random_hook();
        debug!(topic, content_hook, hook, "Simulated script generated.");

        Ok(compose_script(topic, content_hook, hook, &Local::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn produces_templated_script() {
        let adapter = SimulatedScriptAdapter::new(Duration::ZERO);
        let script = adapter.generate_script("Cooking Hacks").await.unwrap();

        assert_eq!(script.title, "Cooking Hacks Script");
        assert!(HOOKS.contains(&script.hook.as_str()));
        assert!(HOOKS
            .iter()
            .any(|h| script.content.starts_with(&format!("[HOOK] {} Cooking Hacks!", h))));
        assert_eq!(
            script.hashtags,
            vec!["#fyp", "#viral", "#trending", "#cookinghacks"]
        );
        assert!(!script.id.is_empty());
    }

    #[tokio::test]
    async fn waits_for_the_configured_delay() {
        let adapter = SimulatedScriptAdapter::new(Duration::from_millis(50));
        let started = Instant::now();
        adapter.generate_script("travel").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
