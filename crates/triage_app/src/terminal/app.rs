use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use triage_core::{update, AppState, CopyTarget, InputMode, Msg, WorkflowState};
use triage_engine::{AnalysisTransport, ReqwestTransport, TransportSettings};
use triage_logging::{triage_debug, triage_warn};

use super::commands::{self, ShellCommand, HELP};
use super::effects::{ClipboardAccess, EffectRunner, SystemClipboard};
use super::input;
use super::render::{render, status_line};

/// Everything the loop reacts to arrives through one channel, so the
/// controller state is only ever touched from the loop's thread.
pub enum AppEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub struct App<W: Write> {
    state: AppState,
    effects: EffectRunner,
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    out: W,
    last_render: Vec<String>,
}

impl<W: Write> App<W> {
    pub fn new(settings: TransportSettings, out: W) -> io::Result<Self> {
        Self::with_parts(
            Arc::new(ReqwestTransport::new(settings)),
            Box::new(SystemClipboard::default()),
            out,
        )
    }

    pub fn with_parts(
        transport: Arc<dyn AnalysisTransport>,
        clipboard: Box<dyn ClipboardAccess>,
        out: W,
    ) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::with_parts(transport, clipboard, tx.clone())?;
        Ok(Self {
            state: AppState::new(),
            effects,
            tx,
            rx,
            out,
            last_render: Vec::new(),
        })
    }

    /// Feeds `initial` until the workflow settles, waits for any submission
    /// to finish, then returns the final workflow state.
    pub fn run_once(&mut self, initial: Vec<Msg>, copy: bool) -> WorkflowState {
        for msg in initial {
            if self.state.workflow().is_terminal() {
                break;
            }
            self.dispatch(msg);
        }

        while self.state.workflow().is_submitting() {
            match self.rx.recv() {
                Ok(AppEvent::Msg(msg)) => self.dispatch(msg),
                Ok(_) => {}
                Err(_) => break,
            }
        }

        if copy && self.state.workflow().result().is_some() {
            self.dispatch(Msg::CopyClicked(CopyTarget::Suggestion));
            if self.state.is_copied() && self.effects.clipboard_needs_hold() {
                self.print(&[
                    "Keeping the suggestion on the clipboard until something else is copied \
                     (Ctrl-C to stop)."
                        .to_string(),
                ]);
                if let Err(err) = self.effects.hold_clipboard() {
                    triage_warn!("Lost the clipboard: {}", err);
                }
            }
        }
        self.state.workflow().clone()
    }

    /// Interactive loop over `input` lines until `:quit` or end of input.
    pub fn run_shell<R>(&mut self, input: R)
    where
        R: BufRead + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        triage_warn!("Failed to read input: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        });

        self.print(&[HELP.to_string()]);
        while let Ok(event) = self.rx.recv() {
            match event {
                AppEvent::Msg(msg) => self.dispatch(msg),
                AppEvent::Line(line) => {
                    if !self.handle_command(commands::parse(&line)) {
                        break;
                    }
                }
                AppEvent::InputClosed => break,
            }
        }
    }

    /// Returns `false` when the session should end.
    fn handle_command(&mut self, command: ShellCommand) -> bool {
        match command {
            ShellCommand::AppendText(line) => {
                let mut text = self.state.input_text().to_string();
                text.push_str(&line);
                text.push('\n');
                self.dispatch(Msg::ModeSelected(InputMode::Text));
                self.dispatch(Msg::InputChanged(text));
            }
            ShellCommand::TextMode => self.dispatch(Msg::ModeSelected(InputMode::Text)),
            ShellCommand::PickFile(path) => match input::load_file(&path) {
                Ok(file) => self.dispatch(Msg::FileSelected(file)),
                Err(err) => self.print(&[format!("Could not read {}: {err}", path.display())]),
            },
            ShellCommand::ClearFile => self.dispatch(Msg::FileCleared),
            ShellCommand::ClearText => self.dispatch(Msg::InputChanged(String::new())),
            ShellCommand::Analyze => {
                if self.state.workflow().is_submitting() {
                    self.print(&["Still analyzing; use :cancel to abandon it.".to_string()]);
                    return true;
                }
                // An explicit request gets an answer even when nothing changed.
                self.last_render.clear();
                self.dispatch(Msg::AnalyzeClicked);
            }
            ShellCommand::Cancel => self.dispatch(Msg::CancelClicked),
            ShellCommand::Copy(target) => self.dispatch(Msg::CopyClicked(target)),
            ShellCommand::Show => {
                let view = self.state.view();
                let mut lines = vec![status_line(&view)];
                lines.extend(render(&view));
                self.print(&lines);
            }
            ShellCommand::Help => self.print(&[HELP.to_string()]),
            ShellCommand::Quit => return false,
            ShellCommand::Unknown(raw) => {
                self.print(&[format!("Unknown command {raw}; type :help for a list.")]);
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            triage_debug!("dispatch {:?}", DebugMsg(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            pending.extend(self.effects.run(effects));
        }

        if self.state.consume_dirty() {
            let lines = render(&self.state.view());
            self.print_changes(lines);
        }
    }

    /// Prints a render unless it repeats the previous one. A render that only
    /// appends lines prints just the new ones, and one that only drops trailing
    /// lines prints nothing.
    fn print_changes(&mut self, lines: Vec<String>) {
        if lines.starts_with(&self.last_render) {
            let fresh = &lines[self.last_render.len()..];
            self.print(fresh);
        } else if !self.last_render.starts_with(&lines) {
            self.print(&lines);
        }
        self.last_render = lines;
    }

    fn print(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        for line in lines {
            if let Err(err) = writeln!(self.out, "{line}") {
                triage_warn!("Failed to write output: {}", err);
                return;
            }
        }
        let _ = self.out.flush();
    }
}

/// Keeps file bytes out of debug logs.
struct DebugMsg<'a>(&'a Msg);

impl std::fmt::Debug for DebugMsg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Msg::FileSelected(file) => write!(
                f,
                "FileSelected({:?}, {}, {} bytes)",
                file.name,
                file.mime_type,
                file.bytes.len()
            ),
            Msg::InputChanged(text) => write!(f, "InputChanged({} chars)", text.chars().count()),
            other => write!(f, "{other:?}"),
        }
    }
}
