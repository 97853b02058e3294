use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use triage_core::{Effect, Msg};
use triage_engine::{AnalysisTransport, EngineEvent, EngineHandle, EventSink};
use triage_logging::{triage_info, triage_warn};

use super::app::AppEvent;

/// On X11 and Wayland the copied text lives only as long as its owner.
const SELECTION_NEEDS_OWNER: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
));

/// Destination of copied result text.
pub trait ClipboardAccess {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error>;

    /// Whether [`ClipboardAccess::hold`] has to block to keep the last text
    /// available once the process ends.
    fn needs_hold(&self) -> bool {
        false
    }

    /// Blocks until another program takes over the clipboard.
    fn hold(&mut self) -> Result<(), arboard::Error> {
        Ok(())
    }
}

/// The desktop clipboard. The handle stays open for the session so the text
/// remains pasteable while the shell runs.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
    last_text: Option<String>,
}

impl ClipboardAccess for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard.set_text(text.to_string())?;
        self.last_text = Some(text.to_string());
        Ok(())
    }

    fn needs_hold(&self) -> bool {
        SELECTION_NEEDS_OWNER && self.last_text.is_some()
    }

    fn hold(&mut self) -> Result<(), arboard::Error> {
        match (self.clipboard.as_mut(), self.last_text.take()) {
            (Some(clipboard), Some(text)) => hold_selection(clipboard, text),
            _ => Ok(()),
        }
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn hold_selection(clipboard: &mut arboard::Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    clipboard.set().wait().text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn hold_selection(_clipboard: &mut arboard::Clipboard, _text: String) -> Result<(), arboard::Error> {
    Ok(())
}

/// Forwards engine completions into the front end's inbox.
struct InboxSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::AnalysisCompleted { submission, result } => Msg::AnalysisFinished {
                submission,
                outcome: result,
            },
        };
        let _ = self.tx.send(AppEvent::Msg(msg));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardAccess>,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn with_parts(
        transport: Arc<dyn AnalysisTransport>,
        clipboard: Box<dyn ClipboardAccess>,
        tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let sink = Arc::new(InboxSink { tx: tx.clone() });
        let engine = EngineHandle::with_transport(transport, sink)?;
        Ok(Self {
            engine,
            clipboard,
            tx,
        })
    }

    /// Executes `effects` and returns the messages they produce right away.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Submit {
                    submission,
                    request,
                } => {
                    triage_info!(
                        "Submit submission={} kind={}",
                        submission,
                        request.kind_label()
                    );
                    self.engine.submit(submission, request);
                }
                Effect::CancelSubmission { submission } => {
                    triage_info!("CancelSubmission submission={}", submission);
                    self.engine.cancel(submission);
                }
                Effect::CopyToClipboard { ticket, text } => {
                    if let Err(err) = self.clipboard.set_text(&text) {
                        triage_warn!("Clipboard unavailable: {}", err);
                        follow_ups.push(Msg::CopyFailed {
                            ticket,
                            message: err.to_string(),
                        });
                    }
                }
                Effect::ScheduleCopyReset { ticket, after } => {
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = tx.send(AppEvent::Msg(Msg::CopyAckExpired { ticket }));
                    });
                }
            }
        }
        follow_ups
    }

    pub fn clipboard_needs_hold(&self) -> bool {
        self.clipboard.needs_hold()
    }

    pub fn hold_clipboard(&mut self) -> Result<(), arboard::Error> {
        self.clipboard.hold()
    }
}
