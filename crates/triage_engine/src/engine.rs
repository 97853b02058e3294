use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;
use triage_core::{AnalysisRequest, SubmissionId};
use triage_logging::{triage_debug, triage_info, triage_warn};

use crate::transport::{AnalysisTransport, ReqwestTransport};
use crate::{EngineEvent, EventSink, TransportSettings};

enum EngineCommand {
    Submit {
        submission: SubmissionId,
        request: AnalysisRequest,
    },
    Cancel {
        submission: SubmissionId,
    },
    Shutdown,
}

/// Runs submissions on a background tokio runtime and reports completions to
/// an [`EventSink`]. At most one submission is tracked at a time; submitting
/// while another is unsettled cancels the older one.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_transport(Arc::new(ReqwestTransport::new(settings)), sink)
    }

    pub fn with_transport(
        transport: Arc<dyn AnalysisTransport>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("triage-engine")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("triage-engine-commands".to_string())
            .spawn(move || {
                let mut in_flight: Option<(SubmissionId, CancellationToken)> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Submit {
                            submission,
                            request,
                        } => {
                            let token = CancellationToken::new();
                            if let Some((previous, previous_token)) =
                                in_flight.replace((submission, token.clone()))
                            {
                                if !previous_token.is_cancelled() {
                                    triage_warn!(
                                        "Submission {} replaced by {}; cancelling it",
                                        previous,
                                        submission
                                    );
                                    previous_token.cancel();
                                }
                            }
                            let transport = transport.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                run_submission(&*transport, &*sink, submission, request, token)
                                    .await;
                            });
                        }
                        EngineCommand::Cancel { submission } => match in_flight.take() {
                            Some((current, token)) if current == submission => {
                                triage_info!("Cancelling submission {}", submission);
                                token.cancel();
                            }
                            other => {
                                triage_debug!("Cancel for {} ignored", submission);
                                in_flight = other;
                            }
                        },
                        EngineCommand::Shutdown => break,
                    }
                }
                if let Some((_, token)) = in_flight.take() {
                    token.cancel();
                }
                runtime.shutdown_background();
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, submission: SubmissionId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission,
            request,
        });
    }

    pub fn cancel(&self, submission: SubmissionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { submission });
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_submission(
    transport: &dyn AnalysisTransport,
    sink: &dyn EventSink,
    submission: SubmissionId,
    request: AnalysisRequest,
    token: CancellationToken,
) {
    triage_info!(
        "Submission {} started ({} request)",
        submission,
        request.kind_label()
    );
    tokio::select! {
        _ = token.cancelled() => {
            triage_info!("Submission {} cancelled before completion", submission);
        }
        result = transport.submit(&request) => {
            if let Err(error) = &result {
                triage_warn!("Submission {} failed ({}): {}", submission, error.kind, error.message);
            }
            sink.emit(EngineEvent::AnalysisCompleted { submission, result });
        }
    }
    // Marks the submission as settled for the command loop.
    token.cancel();
}
