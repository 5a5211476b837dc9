//! crates/script_studio_core/src/session.rs
//!
//! The in-memory session: one user, their generated scripts, the topic input
//! and the caption editor selections.
//!
//! Script generation is split into `begin_generation` and
//! `complete_generation` (or `abort_generation`) so the host can release its
//! lock on the session while the generator runs. Between the two calls the
//! session reports [`GenerationStatus::Pending`] and refuses to admit a second
//! generation.

use crate::domain::{CaptionOptions, Plan, Script, User, VideoHandle};
use crate::ports::PortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Script limit reached! Upgrade your plan to generate more scripts.")]
    QuotaExceeded { plan: Plan, limit: u32 },
    #[error("A script is already being generated")]
    GenerationInProgress,
    #[error("Video editing with caption overlay is available for premium subscribers only (current plan: {plan})")]
    PremiumRequired { plan: Plan },
    #[error("Choose a video file before adding captions")]
    NoVideoSelected,
    #[error("Script generation failed: {0}")]
    Generation(#[from] PortError),
}

/// Issued by [`StudioSession::begin_generation`] for an admitted generation.
/// Only the session can create one, and it is consumed when the generation
/// completes or aborts.
#[derive(Debug)]
pub struct GenerationTicket {
    generation: u64,
    topic: String,
}

impl GenerationTicket {
    /// The topic exactly as it was entered.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Result of a generation request that was not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The topic was blank; nothing happened.
    Skipped,
    Generated(Script),
}

#[derive(Debug, Clone)]
pub struct StudioSession {
    user: User,
    scripts: Vec<Script>,
    topic: String,
    status: GenerationStatus,
    selected_video: Option<VideoHandle>,
    caption_options: CaptionOptions,
    /// Bumped on every admitted generation; identifies the ticket in flight.
    generation: u64,
}

impl StudioSession {
    pub fn new(user: User) -> Self {
        Self {
            user,
            scripts: Vec::new(),
            topic: String::new(),
            status: GenerationStatus::Idle,
            selected_video: None,
            caption_options: CaptionOptions::default(),
            generation: 0,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Generated scripts, most recent first.
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == GenerationStatus::Pending
    }

    pub fn selected_video(&self) -> Option<&VideoHandle> {
        self.selected_video.as_ref()
    }

    pub fn caption_options(&self) -> &CaptionOptions {
        &self.caption_options
    }

    /// Switches plan unconditionally and returns the previous one.
    pub fn set_plan(&mut self, plan: Plan) -> Plan {
        std::mem::replace(&mut self.user.plan, plan)
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    /// Admits a generation.
    ///
    /// `topic` replaces the topic input for this generation; `None` uses the
    /// stored input. Returns `Ok(None)` when the candidate topic is blank.
    /// Otherwise checks the in-flight guard and then the plan quota. Nothing
    /// is written unless the generation is admitted: the session then stores
    /// the topic, moves to `Pending` and hands out a ticket that must be
    /// passed back to [`complete_generation`](Self::complete_generation) or
    /// [`abort_generation`](Self::abort_generation).
    pub fn begin_generation(
        &mut self,
        topic: Option<&str>,
    ) -> Result<Option<GenerationTicket>, SessionError> {
        let candidate = topic.unwrap_or(self.topic.as_str());
        if candidate.trim().is_empty() {
            return Ok(None);
        }
        if self.is_pending() {
            return Err(SessionError::GenerationInProgress);
        }
        if self.user.quota_reached() {
            return Err(SessionError::QuotaExceeded {
                plan: self.user.plan,
                limit: self.user.plan.script_limit(),
            });
        }

        if let Some(topic) = topic {
            self.topic = topic.to_string();
        }
        self.generation += 1;
        self.status = GenerationStatus::Pending;
        Ok(Some(GenerationTicket {
            generation: self.generation,
            topic: self.topic.clone(),
        }))
    }

    /// Records a generated script: prepends it, bumps the counter, clears the
    /// topic input and returns to `Idle`.
    ///
    /// The plan is not re-checked here, so a plan lowered while the
    /// generation was pending can leave the counter above the new limit.
    pub fn complete_generation(&mut self, ticket: GenerationTicket, mut script: Script) -> &Script {
        self.settle(&ticket);

        // Ids are timestamp-derived; keep them unique within the session.
        let base = script.id.clone();
        let mut suffix = 1;
        while self.scripts.iter().any(|s| s.id == script.id) {
            script.id = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        self.scripts.insert(0, script);
        self.user.scripts_generated += 1;
        self.topic.clear();
        self.status = GenerationStatus::Idle;
        &self.scripts[0]
    }

    /// Returns to `Idle` without recording anything.
    pub fn abort_generation(&mut self, ticket: GenerationTicket) {
        self.settle(&ticket);
        self.status = GenerationStatus::Idle;
    }

    fn settle(&self, ticket: &GenerationTicket) {
        debug_assert!(self.is_pending(), "no generation is in flight");
        debug_assert_eq!(
            ticket.generation, self.generation,
            "ticket belongs to another generation"
        );
    }

    fn require_editor(&self) -> Result<(), SessionError> {
        if self.user.plan.includes_video_editor() {
            Ok(())
        } else {
            Err(SessionError::PremiumRequired {
                plan: self.user.plan,
            })
        }
    }

    pub fn select_video(&mut self, video: VideoHandle) -> Result<(), SessionError> {
        self.require_editor()?;
        self.selected_video = Some(video);
        Ok(())
    }

    pub fn set_caption_options(&mut self, options: CaptionOptions) -> Result<(), SessionError> {
        self.require_editor()?;
        if self.selected_video.is_none() {
            return Err(SessionError::NoVideoSelected);
        }
        self.caption_options = options;
        Ok(())
    }
}
