use crate::{AnalysisError, AnalysisResult, ErrorKind, InputMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: InputMode,
    pub input_text: String,
    pub selected_file_name: Option<String>,
    pub is_submitting: bool,
    pub can_submit: bool,
    pub result: Option<ResultView>,
    pub error: Option<ErrorView>,
    pub copied: bool,
    /// Why the last copy did not reach the clipboard.
    pub copy_error: Option<String>,
    pub dirty: bool,
}

/// Display-ready projection of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub verdict: String,
    pub rationale: String,
    pub category: String,
    pub department: String,
    pub suggestion: String,
    /// Every field the service sent, in key order.
    pub fields: Vec<(String, String)>,
}

impl ResultView {
    pub(crate) fn from_result(result: &AnalysisResult) -> Self {
        Self {
            verdict: result.verdict().to_string(),
            rationale: result.rationale().to_string(),
            category: result.category().to_string(),
            department: result.department().to_string(),
            suggestion: result.suggestion().to_string(),
            fields: result
                .fields()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorView {
    pub(crate) fn from_error(error: &AnalysisError) -> Self {
        Self {
            kind: error.kind,
            message: error.message.clone(),
        }
    }
}
