//! services/api/src/web/views.rs
//!
//! Serializable projections of the core session types. The core crate stays
//! free of any wire format; everything the REST and WebSocket layers put on
//! the wire is defined here.

use script_studio_core::{
    CaptionFontSize, CaptionOptions, CaptionPosition, GenerationStatus, PlanOffer, Script,
    StudioSession, User, VideoHandle,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserView {
    /// One of `free`, `weekly`, `monthly`.
    pub plan: String,
    pub scripts_generated: u32,
    pub videos_edited: u32,
    pub script_limit: u32,
    /// Usage as displayed on the generator view, e.g. `3/5` or `3/∞`.
    pub usage: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            plan: user.plan.to_string(),
            scripts_generated: user.scripts_generated,
            videos_edited: user.videos_edited,
            script_limit: user.plan.script_limit(),
            usage: format!("{}/{}", user.scripts_generated, user.plan.display_limit()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ScriptView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub hook: String,
    pub hashtags: Vec<String>,
    pub created_at: String,
}

impl From<&Script> for ScriptView {
    fn from(script: &Script) -> Self {
        Self {
            id: script.id.clone(),
            title: script.title.clone(),
            content: script.content.clone(),
            hook: script.hook.clone(),
            hashtags: script.hashtags.clone(),
            created_at: script.created_at.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VideoView {
    pub file_name: String,
    pub content_type: Option<String>,
}

impl From<&VideoHandle> for VideoView {
    fn from(video: &VideoHandle) -> Self {
        Self {
            file_name: video.file_name.clone(),
            content_type: video.content_type.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeKey {
    Small,
    Medium,
    Large,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PositionKey {
    Bottom,
    Center,
    Top,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CaptionOptionsView {
    pub text: String,
    pub font_size: FontSizeKey,
    pub position: PositionKey,
}

impl From<&CaptionOptions> for CaptionOptionsView {
    fn from(options: &CaptionOptions) -> Self {
        Self {
            text: options.text.clone(),
            font_size: match options.font_size {
                CaptionFontSize::Small => FontSizeKey::Small,
                CaptionFontSize::Medium => FontSizeKey::Medium,
                CaptionFontSize::Large => FontSizeKey::Large,
            },
            position: match options.position {
                CaptionPosition::Bottom => PositionKey::Bottom,
                CaptionPosition::Center => PositionKey::Center,
                CaptionPosition::Top => PositionKey::Top,
            },
        }
    }
}

impl From<CaptionOptionsView> for CaptionOptions {
    fn from(view: CaptionOptionsView) -> Self {
        Self {
            text: view.text,
            font_size: match view.font_size {
                FontSizeKey::Small => CaptionFontSize::Small,
                FontSizeKey::Medium => CaptionFontSize::Medium,
                FontSizeKey::Large => CaptionFontSize::Large,
            },
            position: match view.position {
                PositionKey::Bottom => CaptionPosition::Bottom,
                PositionKey::Center => CaptionPosition::Center,
                PositionKey::Top => CaptionPosition::Top,
            },
        }
    }
}

/// Everything the presentation layer reads from the session.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SessionView {
    pub user: UserView,
    /// `idle` or `pending`.
    pub status: String,
    pub topic: String,
    pub script_count: usize,
    pub selected_video: Option<VideoView>,
    pub caption_options: CaptionOptionsView,
}

impl From<&StudioSession> for SessionView {
    fn from(session: &StudioSession) -> Self {
        Self {
            user: UserView::from(session.user()),
            status: status_label(session.status()).to_string(),
            topic: session.topic().to_string(),
            script_count: session.scripts().len(),
            selected_video: session.selected_video().map(VideoView::from),
            caption_options: CaptionOptionsView::from(session.caption_options()),
        }
    }
}

pub fn status_label(status: GenerationStatus) -> &'static str {
    match status {
        GenerationStatus::Idle => "idle",
        GenerationStatus::Pending => "pending",
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PlanFeatureView {
    pub text: String,
    pub included: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PlanOfferView {
    pub plan: String,
    pub name: String,
    pub price: String,
    pub period: String,
    pub popular: bool,
    pub script_limit: u32,
    /// Whether this is the session's active plan.
    pub current: bool,
    pub features: Vec<PlanFeatureView>,
}

impl PlanOfferView {
    pub fn new(offer: &PlanOffer, current: bool) -> Self {
        Self {
            plan: offer.plan.to_string(),
            name: offer.display_name.to_string(),
            price: offer.price.to_string(),
            period: offer.period.to_string(),
            popular: offer.popular,
            script_limit: offer.plan.script_limit(),
            current,
            features: offer
                .features
                .iter()
                .map(|f| PlanFeatureView {
                    text: f.text.to_string(),
                    included: f.included,
                })
                .collect(),
        }
    }
}
