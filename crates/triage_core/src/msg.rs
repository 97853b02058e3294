use crate::{
    AnalysisError, AnalysisResult, CopyTarget, CopyTicket, InputMode, SelectedFile, SubmissionId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the email text box.
    InputChanged(String),
    /// User switched between pasted text and file upload.
    ModeSelected(InputMode),
    /// User picked a file to upload.
    FileSelected(SelectedFile),
    /// User removed the picked file.
    FileCleared,
    /// User asked for an analysis of the current input.
    AnalyzeClicked,
    /// Replace the text input and analyze it in one step.
    TextSubmitted(String),
    /// User gave up on the submission in flight.
    CancelClicked,
    /// Transport completion for a submission.
    AnalysisFinished {
        submission: SubmissionId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    /// User asked to copy part of the result.
    CopyClicked(CopyTarget),
    /// The clipboard refused the text for the given copy.
    CopyFailed { ticket: CopyTicket, message: String },
    /// The "copied" acknowledgement timer fired.
    CopyAckExpired { ticket: CopyTicket },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
