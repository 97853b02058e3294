//! Line-oriented front end: feeds user input to the controller, executes its
//! effects and prints the view model.
mod app;
mod commands;
mod effects;
mod input;
mod render;

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use triage_core::{Msg, WorkflowState};
use triage_engine::TransportSettings;

use crate::cli::Command;
use app::App;

pub fn run(command: Command, settings: TransportSettings) -> anyhow::Result<ExitCode> {
    let mut app = App::new(settings, io::stdout()).context("failed to start the engine")?;

    let (initial, copy) = match command {
        Command::Shell => {
            app.run_shell(io::BufReader::new(io::stdin()));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Text { body, copy } => {
            let body = if body == "-" {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read email text from stdin")?;
                text
            } else {
                body
            };
            (vec![Msg::TextSubmitted(body)], copy)
        }
        Command::File { path, copy } => {
            let file = input::load_file(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (vec![Msg::FileSelected(file), Msg::AnalyzeClicked], copy)
        }
    };

    let outcome = app.run_once(initial, copy);
    Ok(ExitCode::from(exit_status(&outcome)))
}

/// Process status for a one-shot run: 1 when the analysis failed.
fn exit_status(outcome: &WorkflowState) -> u8 {
    match outcome {
        WorkflowState::Failed(_) => 1,
        _ => 0,
    }
}
