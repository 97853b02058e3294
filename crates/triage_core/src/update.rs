use crate::{
    validate_file_type, validate_text, AnalysisError, AnalysisRequest, AppState, CopyTarget,
    Effect, InputMode, Msg, SelectedFile, COPY_ACK_DURATION,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Inputs are frozen while a request is out, like a disabled form.
    let submitting = state.workflow().is_submitting();

    let effects = match msg {
        Msg::InputChanged(text) => {
            if !submitting {
                state.set_input_text(text);
            }
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if !submitting {
                state.set_mode(mode);
            }
            Vec::new()
        }
        Msg::FileSelected(file) => {
            if !submitting {
                select_file(&mut state, file);
            }
            Vec::new()
        }
        Msg::FileCleared => {
            if !submitting && state.selected_file().is_some() {
                state.set_selected_file(None);
            }
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            if submitting {
                return (state, Vec::new());
            }
            analyze(&mut state)
        }
        Msg::TextSubmitted(text) => {
            if submitting {
                return (state, Vec::new());
            }
            state.set_input_text(text);
            state.set_mode(InputMode::Text);
            analyze(&mut state)
        }
        Msg::CancelClicked => match state.cancel_submission() {
            Some(submission) => vec![Effect::CancelSubmission { submission }],
            None => Vec::new(),
        },
        Msg::AnalysisFinished {
            submission,
            outcome,
        } => {
            // A completion for anything but the current submission is stale.
            state.finish_submission(submission, outcome);
            Vec::new()
        }
        Msg::CopyClicked(target) => copy(&mut state, target),
        Msg::CopyFailed { ticket, message } => {
            state.fail_copy(ticket, message);
            Vec::new()
        }
        Msg::CopyAckExpired { ticket } => {
            state.expire_copy_ack(ticket);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_file(state: &mut AppState, file: SelectedFile) {
    match validate_file_type(&file.mime_type) {
        Ok(mime_type) => {
            state.set_selected_file(Some(SelectedFile { mime_type, ..file }));
            state.set_mode(InputMode::File);
        }
        Err(error) => {
            state.set_selected_file(None);
            state.fail_locally(error);
        }
    }
}

fn analyze(state: &mut AppState) -> Vec<Effect> {
    let request = match state.mode() {
        InputMode::Text => match validate_text(state.input_text()) {
            Ok(()) => state.text_request(),
            Err(error) => {
                state.fail_locally(error);
                return Vec::new();
            }
        },
        InputMode::File => match state.selected_file() {
            Some(file) => AnalysisRequest::File {
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                bytes: file.bytes.clone(),
            },
            None => {
                state.fail_locally(AnalysisError::validation(
                    "Please choose a .txt or .pdf file to analyze.",
                ));
                return Vec::new();
            }
        },
    };

    let submission = state.begin_submission();
    vec![Effect::Submit {
        submission,
        request,
    }]
}

fn copy(state: &mut AppState, target: CopyTarget) -> Vec<Effect> {
    let Some(result) = state.workflow().result() else {
        return Vec::new();
    };
    let text = match target {
        CopyTarget::Verdict => result.verdict(),
        CopyTarget::Rationale => result.rationale(),
        CopyTarget::Suggestion => result.suggestion(),
    }
    .to_string();
    if text.is_empty() {
        return Vec::new();
    }

    let ticket = state.acknowledge_copy();
    vec![
        Effect::CopyToClipboard { ticket, text },
        Effect::ScheduleCopyReset {
            ticket,
            after: COPY_ACK_DURATION,
        },
    ]
}
