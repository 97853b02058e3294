use std::path::PathBuf;

use triage_core::CopyTarget;

pub const HELP: &str = "\
Type or paste the email; every plain line is appended to the text.
  :text             switch to pasted-text mode
  :file <path>      pick a .txt or .pdf file to upload
  :clear-file       forget the picked file
  :clear            empty the text
  :analyze          send the current input
  :cancel           abandon the request in flight
  :copy [verdict|rationale|suggestion]
                    copy part of the result (suggestion by default)
  :show             print the current state
  :help             show this help
  :quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    AppendText(String),
    TextMode,
    PickFile(PathBuf),
    ClearFile,
    ClearText,
    Analyze,
    Cancel,
    Copy(CopyTarget),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse(line: &str) -> ShellCommand {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return ShellCommand::AppendText(line.to_string());
    };
    let (name, arg) = match command.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match (name, arg) {
        ("text", "") => ShellCommand::TextMode,
        ("file", path) if !path.is_empty() => ShellCommand::PickFile(PathBuf::from(path)),
        ("clear-file", "") => ShellCommand::ClearFile,
        ("clear", "") => ShellCommand::ClearText,
        ("analyze" | "a", "") => ShellCommand::Analyze,
        ("cancel", "") => ShellCommand::Cancel,
        ("copy", "" | "suggestion") => ShellCommand::Copy(CopyTarget::Suggestion),
        ("copy", "verdict") => ShellCommand::Copy(CopyTarget::Verdict),
        ("copy", "rationale" | "reason") => ShellCommand::Copy(CopyTarget::Rationale),
        ("show", "") => ShellCommand::Show,
        ("help" | "h", "") => ShellCommand::Help,
        ("quit" | "q", "") => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_lines_are_text() {
        assert_eq!(
            parse("Dear team, please advise."),
            ShellCommand::AppendText("Dear team, please advise.".to_string())
        );
        assert_eq!(parse(""), ShellCommand::AppendText(String::new()));
    }

    #[test]
    fn commands_and_arguments_are_recognised() {
        assert_eq!(
            parse(":file  inbox/mail 1.pdf "),
            ShellCommand::PickFile(PathBuf::from("inbox/mail 1.pdf"))
        );
        assert_eq!(parse(":analyze"), ShellCommand::Analyze);
        assert_eq!(parse("  :q"), ShellCommand::Quit);
        assert_eq!(parse(":copy"), ShellCommand::Copy(CopyTarget::Suggestion));
        assert_eq!(parse(":copy verdict"), ShellCommand::Copy(CopyTarget::Verdict));
        assert_eq!(parse(":copy reason"), ShellCommand::Copy(CopyTarget::Rationale));
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert_eq!(parse(":file"), ShellCommand::Unknown(":file".to_string()));
        assert_eq!(
            parse(":copy everything"),
            ShellCommand::Unknown(":copy everything".to_string())
        );
        assert_eq!(parse(":launch"), ShellCommand::Unknown(":launch".to_string()));
    }
}
