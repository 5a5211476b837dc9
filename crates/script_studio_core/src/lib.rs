pub mod domain;
pub mod ports;
pub mod pricing;
pub mod session;
pub mod template;

pub use domain::{CaptionFontSize, CaptionOptions, CaptionPosition, Plan, Script, UnknownPlan, User, VideoHandle};
pub use ports::{PortError, PortResult, ScriptGenerationService};
pub use pricing::{plan_catalog, PlanFeature, PlanOffer};
pub use session::{GenerationOutcome, GenerationStatus, GenerationTicket, SessionError, StudioSession};
