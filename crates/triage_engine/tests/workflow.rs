//! End-to-end runs of the controller against the real transport.

use std::net::TcpListener;

use pretty_assertions::assert_eq;
use serde_json::json;
use triage_core::{update, AppState, Effect, ErrorKind, Msg, SelectedFile, WorkflowState};
use triage_engine::{AnalysisTransport, ReqwestTransport, TransportSettings, NETWORK_ERROR};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Feeds `msg` to the controller and runs any submission to completion.
async fn drive(
    state: AppState,
    msg: Msg,
    transport: &dyn AnalysisTransport,
) -> (AppState, usize) {
    let (mut state, effects) = update(state, msg);
    let mut calls = 0;
    for effect in effects {
        if let Effect::Submit {
            submission,
            request,
        } = effect
        {
            calls += 1;
            assert_eq!(state.workflow(), &WorkflowState::Submitting);
            let outcome = transport.submit(&request).await;
            state = update(
                state,
                Msg::AnalysisFinished {
                    submission,
                    outcome,
                },
            )
            .0;
        }
    }
    (state, calls)
}

#[tokio::test]
async fn pasted_text_round_trip_succeeds() {
    triage_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(body_json(json!({ "text": "Please send the invoice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Aprovado",
            "reason": "Routine request",
            "department": "Finance"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(TransportSettings::with_base_url(&server.uri()).expect("url"));

    let (state, calls) = drive(
        AppState::new(),
        Msg::TextSubmitted("Please send the invoice".to_string()),
        &transport,
    )
    .await;

    assert_eq!(calls, 1);
    let result = state.workflow().result().expect("succeeded");
    assert_eq!(result.verdict(), "Aprovado");
    assert_eq!(result.rationale(), "Routine request");
    assert_eq!(result.department(), "Finance");
}

#[tokio::test]
async fn rejected_text_surfaces_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "text field required" })),
        )
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(TransportSettings::with_base_url(&server.uri()).expect("url"));

    let (state, _) = drive(
        AppState::new(),
        Msg::TextSubmitted("hello".to_string()),
        &transport,
    )
    .await;

    let error = state.workflow().error().expect("failed");
    assert_eq!(error.kind, ErrorKind::ServerRejected);
    assert_eq!(error.message, "text field required");
}

#[tokio::test]
async fn unreachable_service_fails_with_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let transport = ReqwestTransport::new(
        TransportSettings::with_base_url(&format!("http://127.0.0.1:{port}")).expect("url"),
    );

    let (state, calls) = drive(
        AppState::new(),
        Msg::TextSubmitted("hello".to_string()),
        &transport,
    )
    .await;

    assert_eq!(calls, 1);
    let error = state.workflow().error().expect("failed");
    assert_eq!(error.kind, ErrorKind::Network);
    assert_eq!(error.message, NETWORK_ERROR);
}

#[tokio::test]
async fn blank_text_and_png_never_reach_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(TransportSettings::with_base_url(&server.uri()).expect("url"));

    let (state, calls) = drive(
        AppState::new(),
        Msg::TextSubmitted("  \n ".to_string()),
        &transport,
    )
    .await;
    assert_eq!(calls, 0);
    assert_eq!(
        state.workflow().error().map(|error| error.kind),
        Some(ErrorKind::Validation)
    );

    let png = SelectedFile::new("scan.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
    let (state, calls) = drive(state, Msg::FileSelected(png), &transport).await;
    assert_eq!(calls, 0);
    assert!(state.selected_file().is_none());

    let (state, calls) = drive(state, Msg::AnalyzeClicked, &transport).await;
    assert_eq!(calls, 0);
    assert_eq!(
        state.workflow().error().map(|error| error.kind),
        Some(ErrorKind::Validation)
    );
    server.verify().await;
}

#[tokio::test]
async fn selected_file_is_uploaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Reprovado",
            "reason": "Not work related",
            "improvement_suggestion": "State the request up front."
        })))
        .expect(1)
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(TransportSettings::with_base_url(&server.uri()).expect("url"));

    let file = SelectedFile::new("mail.txt", "text/plain", b"see you at lunch".to_vec());
    let (state, _) = drive(AppState::new(), Msg::FileSelected(file), &transport).await;
    let (state, calls) = drive(state, Msg::AnalyzeClicked, &transport).await;

    assert_eq!(calls, 1);
    let view = state.view().result.expect("result");
    assert_eq!(view.verdict, "Reprovado");
    assert_eq!(view.suggestion, "State the request up front.");
}
