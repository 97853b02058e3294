use std::collections::BTreeMap;
use std::fmt;

/// Keys that may carry the verdict, in lookup order.
pub const VERDICT_KEYS: &[&str] = &["status", "category", "main_category"];
/// Keys that may carry the justification for the verdict, in lookup order.
///
/// The oldest deployments only returned a suggested reply next to the
/// category, so `suggested_response` doubles as the rationale there.
pub const RATIONALE_KEYS: &[&str] = &["reason", "suggested_response"];
/// Keys that may carry a rewritten or suggested email body, in lookup order.
pub const SUGGESTION_KEYS: &[&str] = &[
    "rewritten_email",
    "improvement_suggestion",
    "suggested_response",
];
/// Keys that may carry the business category, in lookup order.
pub const CATEGORY_KEYS: &[&str] = &["main_category", "category"];
/// Keys that may carry the routing department.
pub const DEPARTMENT_KEYS: &[&str] = &["department"];

/// A single request to the classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Pasted email text, sent as JSON.
    Text { body: String },
    /// An uploaded file, sent as multipart form data.
    File {
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl AnalysisRequest {
    /// Short label used in logs.
    pub fn kind_label(&self) -> &'static str {
        match self {
            AnalysisRequest::Text { .. } => "text",
            AnalysisRequest::File { .. } => "file",
        }
    }
}

/// Verdict returned by the service.
///
/// The field set is owned by the service and has changed between releases, so
/// the result is kept as a plain string map. Accessors resolve the fields the
/// presentation needs across all known shapes and return `""` when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    fields: BTreeMap<String, String>,
}

impl AnalysisResult {
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Value of `key`, or `""` when the service did not send it.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// All fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn verdict(&self) -> &str {
        self.first_of(VERDICT_KEYS)
    }

    pub fn rationale(&self) -> &str {
        self.first_of(RATIONALE_KEYS)
    }

    pub fn suggestion(&self) -> &str {
        self.first_of(SUGGESTION_KEYS)
    }

    pub fn category(&self) -> &str {
        self.first_of(CATEGORY_KEYS)
    }

    pub fn department(&self) -> &str {
        self.first_of(DEPARTMENT_KEYS)
    }

    /// Name of the first minimum field (verdict, then rationale) that is absent.
    pub fn missing_minimum_field(&self) -> Option<&'static str> {
        if !self.has_any(VERDICT_KEYS) {
            return Some("verdict");
        }
        if !self.has_any(RATIONALE_KEYS) {
            return Some("rationale");
        }
        None
    }

    fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.fields.contains_key(*key))
    }

    fn first_of(&self, keys: &[&str]) -> &str {
        keys.iter()
            .find_map(|key| self.fields.get(*key))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for AnalysisResult
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally; no request was sent.
    Validation,
    /// The service could not be reached.
    Network,
    /// The service answered with an error status or an unusable body.
    ServerRejected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::ServerRejected => write!(f, "server rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn server_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerRejected, message)
    }
}
