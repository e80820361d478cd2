/// Backend client: the single point of entry for all calls to the résumé service.
///
/// ARCHITECTURAL RULE: the workflow only talks to the service through the three
/// client traits below. `BackendClient` is the HTTP implementation of all three.
///
/// Every call is a single attempt. Retrying is always a fresh user action.
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::export::suggested_filename;
use crate::models::{
    AnalysisResult, ExportArtifact, ExportFormat, ExportRequest, SelectedFile, TemplateStyle,
};

mod wire;

use wire::{extract_detail, mime_for, AnalyzeRequest, UploadResponse};

/// Fallback messages used when the service gives no usable detail.
pub const UPLOAD_FAILED: &str = "upload failed";
pub const ANALYSIS_FAILED: &str = "analysis failed";
pub const EXPORT_FAILED: &str = "export failed";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service reported the request as unsuccessful")]
    Rejected,

    #[error("response is missing `{0}`")]
    Incomplete(&'static str),
}

impl ClientError {
    /// The message to show the user: the service's own detail when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// What the extraction service returned for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedResume {
    pub extracted_text: String,
    pub filename: String,
}

#[async_trait]
pub trait UploadClient: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadedResume, ClientError>;
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<AnalysisResult, ClientError>;
}

#[async_trait]
pub trait ExportClient: Send + Sync {
    async fn export(
        &self,
        resume_text: &str,
        template_style: TemplateStyle,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ClientError>;
}

/// HTTP client for the résumé service. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// `base_url` is the service root; endpoints live under `<base_url>/api`.
    /// No request timeout is set, the transport default applies.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

/// Turns a non-success response into `ClientError::Api`, keeping the service detail.
async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    warn!("Résumé service returned {status}: {body}");
    ClientError::Api {
        status,
        detail: extract_detail(&body),
    }
}

#[async_trait]
impl UploadClient for BackendClient {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadedResume, ClientError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))?;
        let form = multipart::Form::new().part("file", part);

        debug!(
            "Uploading {} ({} bytes) for document {}",
            file.name,
            file.bytes.len(),
            file.document_id
        );

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;
        if !parsed.success {
            return Err(ClientError::Rejected);
        }
        let extracted_text = parsed
            .extracted_text
            .ok_or(ClientError::Incomplete("extracted_text"))?;

        debug!("Upload succeeded: extracted {} chars", extracted_text.len());

        Ok(UploadedResume {
            extracted_text,
            filename: parsed.filename.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl AnalysisClient for BackendClient {
    async fn analyze(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<AnalysisResult, ClientError> {
        let request_body = AnalyzeRequest {
            resume_text,
            target_role,
        };

        let response = self
            .client
            .post(self.endpoint("analyze"))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let result: AnalysisResult = serde_json::from_str(&body)?;

        debug!(
            "Analysis succeeded: missing={}, weak={}, suggestions={}",
            result.missing_sections.len(),
            result.weak_areas.len(),
            result.improvement_suggestions.len()
        );

        Ok(result)
    }
}

#[async_trait]
impl ExportClient for BackendClient {
    async fn export(
        &self,
        resume_text: &str,
        template_style: TemplateStyle,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ClientError> {
        let request_body = ExportRequest {
            resume_text,
            template_style,
            format,
        };

        let response = self
            .client
            .post(self.endpoint("export"))
            .json(&request_body)
            .send()
            .await?;

        // Binary endpoint: the error body is not assumed to be decodable.
        let status = response.status();
        if !status.is_success() {
            warn!("Export returned {status}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail: None,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Export succeeded: {} bytes of {format}", bytes.len());

        Ok(ExportArtifact {
            bytes,
            filename: suggested_filename(template_style, format),
        })
    }
}
