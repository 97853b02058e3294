use pretty_assertions::assert_eq;
use triage_core::{
    update, AnalysisError, AppState, CopyTarget, Effect, InputMode, Msg, SelectedFile,
    WorkflowState, COPY_ACK_DURATION,
};

fn submitting_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged("Hello".to_string()));
    let (mut state, effects) = update(state, Msg::AnalyzeClicked);
    assert_eq!(effects.len(), 1);
    assert!(state.consume_dirty());
    state
}

fn succeeded_state() -> AppState {
    let (state, _) = update(
        submitting_state(),
        Msg::AnalysisFinished {
            submission: 1,
            outcome: Ok([
                ("status", "Reprovado"),
                ("reason", "Too vague"),
                ("improvement_suggestion", "Add the order number."),
            ]
            .into_iter()
            .collect()),
        },
    );
    state
}

#[test]
fn second_submit_while_submitting_is_a_noop() {
    let state = submitting_state();
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());

    let (next, effects) = update(next, Msg::TextSubmitted("Other".to_string()));
    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert_eq!(next.in_flight(), Some(1));
}

#[test]
fn inputs_are_frozen_while_submitting() {
    let state = submitting_state();
    let before = state.clone();

    let (state, _) = update(state, Msg::InputChanged("edited".to_string()));
    let (state, _) = update(state, Msg::ModeSelected(InputMode::File));
    let (state, _) = update(
        state,
        Msg::FileSelected(SelectedFile::new("a.png", "image/png", Vec::new())),
    );
    let (state, _) = update(state, Msg::FileCleared);

    assert_eq!(state, before);
    assert_eq!(state.workflow(), &WorkflowState::Submitting);
}

#[test]
fn stale_completion_is_ignored() {
    let state = submitting_state();

    let (next, effects) = update(
        state.clone(),
        Msg::AnalysisFinished {
            submission: 7,
            outcome: Err(AnalysisError::network("could not reach the analysis service")),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn cancel_returns_to_idle_and_drops_late_completion() {
    let state = submitting_state();

    let (state, effects) = update(state, Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::CancelSubmission { submission: 1 }]);
    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert_eq!(state.in_flight(), None);

    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission: 1,
            outcome: Ok([("status", "Aprovado"), ("reason", "ok")]
                .into_iter()
                .collect()),
        },
    );
    assert_eq!(state.workflow(), &WorkflowState::Idle);

    let (_state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());
}

#[test]
fn submission_ids_increase_across_attempts() {
    let state = succeeded_state();
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Submit { submission: 2, .. }]
    ));

    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission: 2,
            outcome: Err(AnalysisError::server_rejected("boom")),
        },
    );
    let (_state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Submit { submission: 3, .. }]
    ));
}

#[test]
fn copy_sets_acknowledgement_and_schedules_reset() {
    let state = succeeded_state();

    let (mut state, effects) = update(state, Msg::CopyClicked(CopyTarget::Suggestion));

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                ticket: 1,
                text: "Add the order number.".to_string(),
            },
            Effect::ScheduleCopyReset {
                ticket: 1,
                after: COPY_ACK_DURATION,
            },
        ]
    );
    assert!(state.view().copied);
    assert!(state.consume_dirty());
    assert!(matches!(state.workflow(), WorkflowState::Succeeded(_)));

    let (state, _) = update(state, Msg::CopyAckExpired { ticket: 1 });
    assert!(!state.view().copied);
}

#[test]
fn only_latest_copy_ticket_clears_acknowledgement() {
    let state = succeeded_state();
    let (state, _) = update(state, Msg::CopyClicked(CopyTarget::Verdict));
    let (state, effects) = update(state, Msg::CopyClicked(CopyTarget::Rationale));
    assert_eq!(
        effects[0],
        Effect::CopyToClipboard {
            ticket: 2,
            text: "Too vague".to_string(),
        }
    );

    let (state, _) = update(state, Msg::CopyAckExpired { ticket: 1 });
    assert!(state.is_copied());

    let (state, _) = update(state, Msg::CopyAckExpired { ticket: 2 });
    assert!(!state.is_copied());
}

#[test]
fn copy_without_result_or_empty_field_does_nothing() {
    let (mut state, effects) = update(AppState::new(), Msg::CopyClicked(CopyTarget::Verdict));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (state, _) = update(
        submitting_state(),
        Msg::AnalysisFinished {
            submission: 1,
            outcome: Ok([("status", "Aprovado"), ("reason", "ok")]
                .into_iter()
                .collect()),
        },
    );
    let (state, effects) = update(state, Msg::CopyClicked(CopyTarget::Suggestion));
    assert!(effects.is_empty());
    assert!(!state.is_copied());
}

#[test]
fn new_submission_clears_copy_acknowledgement() {
    let state = succeeded_state();
    let (state, _) = update(state, Msg::CopyClicked(CopyTarget::Verdict));
    assert!(state.is_copied());

    let (state, _) = update(state, Msg::AnalyzeClicked);
    assert!(!state.is_copied());
    assert!(!state.view().copied);
}

#[test]
fn failed_copy_withdraws_acknowledgement() {
    let state = succeeded_state();
    let (mut state, _) = update(state, Msg::CopyClicked(CopyTarget::Suggestion));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::CopyFailed {
            ticket: 1,
            message: "no display".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(!view.copied);
    assert_eq!(view.copy_error.as_deref(), Some("no display"));

    // The reset timer of the failed copy changes nothing.
    let (mut state, _) = update(state, Msg::CopyAckExpired { ticket: 1 });
    assert!(!state.consume_dirty());
    assert_eq!(state.copy_error(), Some("no display"));

    let (state, _) = update(state, Msg::CopyClicked(CopyTarget::Verdict));
    assert!(state.is_copied());
    assert_eq!(state.copy_error(), None);
}

#[test]
fn failure_of_an_older_copy_is_ignored() {
    let state = succeeded_state();
    let (state, _) = update(state, Msg::CopyClicked(CopyTarget::Verdict));
    let (mut state, _) = update(state, Msg::CopyClicked(CopyTarget::Rationale));
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::CopyFailed {
            ticket: 1,
            message: "busy".to_string(),
        },
    );
    assert!(!state.consume_dirty());
    assert!(state.is_copied());
    assert_eq!(state.copy_error(), None);
}
