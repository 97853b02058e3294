use crate::AnalysisError;

/// File types the service accepts on `/classify-file`.
pub const ALLOWED_MIME_TYPES: &[&str] = &["text/plain", "application/pdf"];

/// Rejects text that is empty once surrounding whitespace is removed.
pub fn validate_text(body: &str) -> Result<(), AnalysisError> {
    if body.trim().is_empty() {
        return Err(AnalysisError::validation(
            "Please enter the email text to analyze.",
        ));
    }
    Ok(())
}

/// Checks a file's mime type and returns its normalized form.
pub fn validate_file_type(mime_type: &str) -> Result<String, AnalysisError> {
    let normalized = normalize_mime_type(mime_type);
    if ALLOWED_MIME_TYPES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(AnalysisError::validation(format!(
            "Unsupported file type '{}'. Please choose a .txt or .pdf file.",
            mime_type.trim()
        )))
    }
}

/// Lowercases the essence of a mime type and drops any parameters.
///
/// `Text/Plain; charset=UTF-8` becomes `text/plain`.
pub fn normalize_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn whitespace_only_text_is_rejected() {
        for body in ["", "   ", "\n\t \r\n"] {
            let err = validate_text(body).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(validate_text("  hi  ").is_ok());
    }

    #[test]
    fn mime_parameters_and_case_are_ignored() {
        assert_eq!(
            validate_file_type("Text/Plain; charset=UTF-8").unwrap(),
            "text/plain"
        );
        assert_eq!(
            validate_file_type("application/pdf").unwrap(),
            "application/pdf"
        );
        assert_eq!(
            validate_file_type("image/png").unwrap_err().kind,
            ErrorKind::Validation
        );
        assert!(validate_file_type("").is_err());
    }
}
