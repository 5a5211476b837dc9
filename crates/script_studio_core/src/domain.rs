//! crates/script_studio_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use std::fmt;
use std::str::FromStr;

/// Subscription tier. Determines the script quota and editor access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Plan {
    #[default]
    Free,
    Weekly,
    Monthly,
}

impl Plan {
    /// All plans, in pricing-table order.
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Weekly, Plan::Monthly];

    /// The maximum number of scripts a session on this plan may generate.
    ///
    /// Monthly is advertised as unlimited but is still a finite ceiling.
    pub fn script_limit(self) -> u32 {
        match self {
            Plan::Free => 5,
            Plan::Weekly => 50,
            Plan::Monthly => 999,
        }
    }

    /// The ceiling as shown next to the usage counter ("3/5", "3/∞").
    pub fn display_limit(self) -> String {
        match self {
            Plan::Monthly => "∞".to_string(),
            other => other.script_limit().to_string(),
        }
    }

    /// Whether the caption editor is unlocked for this plan.
    pub fn includes_video_editor(self) -> bool {
        !matches!(self, Plan::Free)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Weekly => "weekly",
            Plan::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan '{0}', expected one of: free, weekly, monthly")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "weekly" => Ok(Plan::Weekly),
            "monthly" => Ok(Plan::Monthly),
            _ => Err(UnknownPlan(s.to_string())),
        }
    }
}

/// The single user of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub plan: Plan,
    pub scripts_generated: u32,
    // Never mutated; the editor does not export anything.
    pub videos_edited: u32,
}

impl User {
    pub fn new(plan: Plan, scripts_generated: u32) -> Self {
        Self {
            plan,
            scripts_generated,
            videos_edited: 0,
        }
    }

    /// Whether the user has used up the quota of their current plan.
    pub fn quota_reached(&self) -> bool {
        self.scripts_generated >= self.plan.script_limit()
    }
}

/// A generated short-form video script. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub id: String,
    pub title: String,
    pub content: String,
    pub hook: String,
    pub hashtags: Vec<String>,
    pub created_at: String,
}

/// An opaque reference to a video file chosen in the caption editor.
/// Only descriptive metadata is kept, never the file's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHandle {
    pub file_name: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionFontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionPosition {
    #[default]
    Bottom,
    Center,
    Top,
}

/// Caption settings collected by the editor mock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptionOptions {
    pub text: String,
    pub font_size: CaptionFontSize,
    pub position: CaptionPosition,
}
