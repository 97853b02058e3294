use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "triage",
    version,
    about = "Send an email to the triage classification service and show the verdict"
)]
pub struct Cli {
    /// RON config file; a missing default file is ignored.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the classification service.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Abort a request after this many seconds (no limit by default).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also log to the terminal.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze pasted email text ("-" reads it from stdin).
    Text {
        body: String,
        /// Copy the suggested email to the clipboard on success.
        #[arg(long)]
        copy: bool,
    },
    /// Analyze a .txt or .pdf file.
    File {
        path: PathBuf,
        /// Copy the suggested email to the clipboard on success.
        #[arg(long)]
        copy: bool,
    },
    /// Interactive session; type `:help` for commands.
    Shell,
}
