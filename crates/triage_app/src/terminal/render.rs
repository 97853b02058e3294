use triage_core::{
    AppViewModel, ErrorKind, InputMode, ResultView, CATEGORY_KEYS, DEPARTMENT_KEYS,
    RATIONALE_KEYS, SUGGESTION_KEYS, VERDICT_KEYS,
};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if view.is_submitting {
        lines.push("Analyzing...".to_string());
        return lines;
    }

    if let Some(error) = &view.error {
        let title = match error.kind {
            ErrorKind::Validation => "Check your input",
            ErrorKind::Network => "Service unreachable",
            ErrorKind::ServerRejected => "The service rejected the request",
        };
        lines.push(format!("{title}: {}", error.message));
    }

    if let Some(result) = &view.result {
        render_result(result, &mut lines);
        if view.copied {
            lines.push("(copied to clipboard)".to_string());
        } else if let Some(message) = &view.copy_error {
            lines.push(format!("(could not copy: {message})"));
        }
    }

    if lines.is_empty() {
        lines.push(idle_line(view));
    }
    lines
}

fn idle_line(view: &AppViewModel) -> String {
    match (view.mode, &view.selected_file_name) {
        (InputMode::Text, _) if view.can_submit => "Ready to analyze the text.".to_string(),
        (InputMode::Text, _) => "Waiting for email text.".to_string(),
        (InputMode::File, Some(name)) => format!("Ready to analyze {name}."),
        (InputMode::File, None) => "No file selected.".to_string(),
    }
}

/// One-line summary of the input side, used by `:show` and when idle.
pub fn status_line(view: &AppViewModel) -> String {
    let mode = match view.mode {
        InputMode::Text => format!("text ({} chars)", view.input_text.chars().count()),
        InputMode::File => match &view.selected_file_name {
            Some(name) => format!("file {name}"),
            None => "file (none selected)".to_string(),
        },
    };
    let readiness = if view.is_submitting {
        "analyzing"
    } else if view.can_submit {
        "ready"
    } else {
        "waiting for input"
    };
    format!("Input: {mode} | {readiness}")
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push(format!("Verdict: {}", result.verdict));
    if !result.category.is_empty() && result.category != result.verdict {
        lines.push(format!("Category: {}", result.category));
    }
    if !result.department.is_empty() {
        lines.push(format!("Department: {}", result.department));
    }
    if !result.rationale.is_empty() && result.rationale != result.suggestion {
        lines.push(format!("Reason: {}", result.rationale));
    }
    if !result.suggestion.is_empty() {
        lines.push("Suggestion:".to_string());
        lines.extend(result.suggestion.lines().map(|line| format!("  {line}")));
    }

    let known = [
        VERDICT_KEYS,
        RATIONALE_KEYS,
        SUGGESTION_KEYS,
        CATEGORY_KEYS,
        DEPARTMENT_KEYS,
    ];
    for (key, value) in &result.fields {
        if !known.iter().any(|keys| keys.contains(&key.as_str())) {
            lines.push(format!("{key}: {value}"));
        }
    }
}
