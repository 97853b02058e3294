use std::time::Duration;

use crate::view_model::{AppViewModel, ErrorView, ResultView};
use crate::{AnalysisError, AnalysisRequest, AnalysisResult};

pub type SubmissionId = u64;
pub type CopyTicket = u64;

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Verdict,
    Rationale,
    Suggestion,
}

/// A file that passed type validation and waits for the next submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Succeeded(_) | WorkflowState::Failed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            WorkflowState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    mode: InputMode,
    input_text: String,
    selected_file: Option<SelectedFile>,
    workflow: WorkflowState,
    in_flight: Option<SubmissionId>,
    next_submission: SubmissionId,
    copy_ack: Option<CopyTicket>,
    copy_error: Option<String>,
    next_copy_ticket: CopyTicket,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn is_copied(&self) -> bool {
        self.copy_ack.is_some()
    }

    pub fn copy_error(&self) -> Option<&str> {
        self.copy_error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let is_submitting = self.workflow.is_submitting();
        let has_input = match self.mode {
            InputMode::Text => !self.input_text.trim().is_empty(),
            InputMode::File => self.selected_file.is_some(),
        };
        AppViewModel {
            mode: self.mode,
            input_text: self.input_text.clone(),
            selected_file_name: self.selected_file.as_ref().map(|file| file.name.clone()),
            is_submitting,
            can_submit: !is_submitting && has_input,
            result: self.workflow.result().map(ResultView::from_result),
            error: self.workflow.error().map(ErrorView::from_error),
            copied: self.is_copied(),
            copy_error: self.copy_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_input_text(&mut self, text: String) {
        if self.input_text != text {
            self.input_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_selected_file(&mut self, file: Option<SelectedFile>) {
        self.selected_file = file;
        self.mark_dirty();
    }

    /// Records a failure that never reached the transport.
    pub(crate) fn fail_locally(&mut self, error: AnalysisError) {
        self.copy_ack = None;
        self.copy_error = None;
        self.workflow = WorkflowState::Failed(error);
        self.mark_dirty();
    }

    /// Enters `Submitting`, clearing the previous result or error, and
    /// returns the id the completion must carry.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.next_submission += 1;
        let submission = self.next_submission;
        self.in_flight = Some(submission);
        self.copy_ack = None;
        self.copy_error = None;
        self.workflow = WorkflowState::Submitting;
        self.mark_dirty();
        submission
    }

    pub(crate) fn text_request(&self) -> AnalysisRequest {
        AnalysisRequest::Text {
            body: self.input_text.clone(),
        }
    }

    /// Applies a transport outcome if it belongs to the submission in flight.
    pub(crate) fn finish_submission(
        &mut self,
        submission: SubmissionId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if self.in_flight != Some(submission) {
            return false;
        }
        self.in_flight = None;
        self.workflow = match outcome {
            Ok(result) => WorkflowState::Succeeded(result),
            Err(error) => WorkflowState::Failed(error),
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn cancel_submission(&mut self) -> Option<SubmissionId> {
        let submission = self.in_flight.take()?;
        self.workflow = WorkflowState::Idle;
        self.mark_dirty();
        Some(submission)
    }

    pub(crate) fn acknowledge_copy(&mut self) -> CopyTicket {
        self.next_copy_ticket += 1;
        self.copy_ack = Some(self.next_copy_ticket);
        self.copy_error = None;
        self.mark_dirty();
        self.next_copy_ticket
    }

    /// Withdraws the acknowledgement of `ticket` and keeps the reason.
    pub(crate) fn fail_copy(&mut self, ticket: CopyTicket, message: String) {
        if self.copy_ack == Some(ticket) {
            self.copy_ack = None;
            self.copy_error = Some(message);
            self.mark_dirty();
        }
    }

    pub(crate) fn expire_copy_ack(&mut self, ticket: CopyTicket) {
        if self.copy_ack == Some(ticket) {
            self.copy_ack = None;
            self.mark_dirty();
        }
    }
}
