use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Route for pasted-text analysis, relative to the base URL.
pub const CLASSIFY_ROUTE: &str = "classify";
/// Route for file-upload analysis, relative to the base URL.
pub const CLASSIFY_FILE_ROUTE: &str = "classify-file";

/// Where a locally started analysis service listens.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid base url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub base_url: Url,
    /// `None` leaves connection setup unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the whole request unbounded.
    pub request_timeout: Option<Duration>,
}

impl TransportSettings {
    /// Settings for `base_url` with no timeouts.
    pub fn with_base_url(base_url: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            connect_timeout: None,
            request_timeout: None,
        })
    }

    /// Absolute URL of `route` below the base path.
    ///
    /// `http://host/api` and `http://host/api/` both map `classify` to
    /// `http://host/api/classify`.
    pub fn endpoint(&self, route: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(route);
        }
        url
    }

    pub fn classify_url(&self) -> Url {
        self.endpoint(CLASSIFY_ROUTE)
    }

    pub fn classify_file_url(&self) -> Url {
        self.endpoint(CLASSIFY_FILE_ROUTE)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    Ok(url)
}
