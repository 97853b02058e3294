//! Triage core: pure analysis workflow state machine and view-model helpers.
mod analysis;
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, ErrorKind, CATEGORY_KEYS, DEPARTMENT_KEYS,
    RATIONALE_KEYS, SUGGESTION_KEYS, VERDICT_KEYS,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, CopyTarget, CopyTicket, InputMode, SelectedFile, SubmissionId, WorkflowState,
    COPY_ACK_DURATION,
};
pub use update::update;
pub use validate::{normalize_mime_type, validate_file_type, validate_text, ALLOWED_MIME_TYPES};
pub use view_model::{AppViewModel, ErrorView, ResultView};
