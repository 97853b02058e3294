use reqwest::multipart::{Form, Part};
use serde::Serialize;
use triage_core::{AnalysisError, AnalysisRequest, AnalysisResult};
use triage_logging::{triage_debug, triage_info, triage_warn};
use url::Url;

use crate::decode::{decode_error_body, decode_result};
use crate::TransportSettings;

/// Message shown for any failure to reach the service.
pub const NETWORK_ERROR: &str = "could not reach the analysis service";
/// Message shown when a configured timeout elapses.
pub const TIMEOUT_ERROR: &str = "the analysis service did not respond in time";

/// One attempt per call; retrying is left to the caller.
#[async_trait::async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit_text(&self, body: &str) -> Result<AnalysisResult, AnalysisError>;

    async fn submit_file(
        &self,
        name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<AnalysisResult, AnalysisError>;

    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        match request {
            AnalysisRequest::Text { body } => self.submit_text(body).await,
            AnalysisRequest::File {
                name,
                mime_type,
                bytes,
            } => self.submit_file(name, mime_type, bytes).await,
        }
    }
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| {
            triage_warn!("Failed to build HTTP client: {}", err);
            AnalysisError::network(NETWORK_ERROR)
        })
    }

    async fn execute(
        &self,
        url: Url,
        request: reqwest::RequestBuilder,
    ) -> Result<AnalysisResult, AnalysisError> {
        let response = request.send().await.map_err(|err| map_reqwest_error(&url, err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(&url, err))?;
        triage_debug!(
            "POST {} -> {} ({} bytes)",
            url,
            status.as_u16(),
            body.len()
        );

        if !status.is_success() {
            let error = decode_error_body(status.as_u16(), &body);
            triage_warn!(
                "POST {} rejected with {}: {}",
                url,
                status.as_u16(),
                error.message
            );
            return Err(error);
        }

        let result = decode_result(&body);
        match &result {
            Ok(result) => triage_info!(
                "POST {} verdict='{}' fields={}",
                url,
                result.verdict(),
                result.len()
            ),
            Err(error) => triage_warn!("POST {} returned an unusable body: {}", url, error),
        }
        result
    }
}

#[async_trait::async_trait]
impl AnalysisTransport for ReqwestTransport {
    async fn submit_text(&self, body: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = self.settings.classify_url();
        let client = self.build_client()?;
        triage_info!("Submitting text for analysis ({} bytes) to {}", body.len(), url);

        // `.json()` sets `Content-Type: application/json`.
        let request = client.post(url.clone()).json(&TextPayload { text: body });
        self.execute(url, request).await
    }

    async fn submit_file(
        &self,
        name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = self.settings.classify_file_url();
        let client = self.build_client()?;
        triage_info!(
            "Submitting file '{}' ({}, {} bytes) to {}",
            name,
            mime_type,
            bytes.len(),
            url
        );

        let part = Part::bytes(bytes.to_vec())
            .file_name(name.to_string())
            .mime_str(mime_type)
            .map_err(|err| {
                triage_warn!("Cannot encode mime type {:?}: {}", mime_type, err);
                AnalysisError::server_rejected(format!(
                    "the file could not be encoded for upload (type '{mime_type}')"
                ))
            })?;
        let form = Form::new().part("file", part);

        // reqwest writes the multipart content type together with its boundary.
        let request = client.post(url.clone()).multipart(form);
        self.execute(url, request).await
    }
}

fn map_reqwest_error(url: &Url, err: reqwest::Error) -> AnalysisError {
    triage_warn!("POST {} failed: {}", url, err);
    if err.is_timeout() {
        return AnalysisError::network(TIMEOUT_ERROR);
    }
    AnalysisError::network(NETWORK_ERROR)
}
