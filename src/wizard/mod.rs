mod draft;
mod state;
mod submit;

pub use draft::{CATEGORIES, FileRef, ManuscriptDraft, PriorityTier, ReviewerCount, ValidationGap};
pub use state::{Advance, Step, StepBadge, SubmissionWizard};
pub use submit::{CancelToken, SimulatedSink, SubmissionReceipt, SubmissionSink, SubmitState};
