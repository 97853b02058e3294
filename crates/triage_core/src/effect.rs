use std::time::Duration;

use crate::{AnalysisRequest, CopyTicket, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit {
        submission: SubmissionId,
        request: AnalysisRequest,
    },
    CancelSubmission {
        submission: SubmissionId,
    },
    /// Place `text` on the clipboard; a failure comes back as
    /// `Msg::CopyFailed { ticket, .. }`.
    CopyToClipboard {
        ticket: CopyTicket,
        text: String,
    },
    /// Deliver `Msg::CopyAckExpired { ticket }` once `after` has elapsed.
    ScheduleCopyReset {
        ticket: CopyTicket,
        after: Duration,
    },
}
