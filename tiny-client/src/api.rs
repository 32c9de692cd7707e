use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use thiserror::Error;
use tracing::{debug, warn};

use tiny_model::{
    CLIENT_CONVERSION_FAILED, ConvertResponse, ErrorResponse, UPLOAD_FIELD,
    routes,
};

use crate::state::SelectedFile;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure talking to the conversion endpoint.
///
/// Every conversion failure displays the same user-facing message; the
/// variants keep the underlying cause for logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{}", CLIENT_CONVERSION_FAILED)]
    Transport(#[source] reqwest::Error),

    #[error("{}", CLIENT_CONVERSION_FAILED)]
    Status {
        status: StatusCode,
        body: Option<ErrorResponse>,
    },

    #[error("{}", CLIENT_CONVERSION_FAILED)]
    InvalidResponse(#[source] reqwest::Error),
}

impl ClientError {
    /// Server-side explanation, when the server sent one.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => Some(match &body.details {
                Some(details) => format!("{}: {}", body.error, details),
                None => body.error.clone(),
            }),
            Self::Build(err)
            | Self::Transport(err)
            | Self::InvalidResponse(err) => Some(err.to_string()),
            Self::Status { body: None, .. } => None,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) | Self::InvalidResponse(err) => err.status(),
            Self::Build(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}

/// Submits one file and returns the converted image as a data URI.
#[async_trait]
pub trait ConversionApi: Send + Sync {
    async fn convert(&self, file: &SelectedFile) -> Result<String, ClientError>;
}

/// [`ConversionApi`] over HTTP, posting `multipart/form-data` to the
/// conversion route of a tiny tools server.
#[derive(Debug, Clone)]
pub struct HttpConversionApi {
    client: Client,
    base_url: String,
}

impl HttpConversionApi {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn convert_url(&self) -> String {
        format!("{}{}", self.base_url, routes::CONVERT)
    }

    fn upload_form(file: &SelectedFile) -> Result<multipart::Form, ClientError> {
        let mut part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone());
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(ClientError::Transport)?;
        }
        Ok(multipart::Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl ConversionApi for HttpConversionApi {
    async fn convert(&self, file: &SelectedFile) -> Result<String, ClientError> {
        let url = self.convert_url();
        debug!(%url, file = %file.name, bytes = file.bytes.len(), "uploading");

        let response = self
            .client
            .post(&url)
            .multipart(Self::upload_form(file)?)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorResponse>().await.ok();
            let err = ClientError::Status { status, body };
            warn!(
                %status,
                details = err.details().as_deref().unwrap_or("none"),
                "conversion request failed"
            );
            return Err(err);
        }

        let body: ConvertResponse = response
            .json()
            .await
            .map_err(ClientError::InvalidResponse)?;
        Ok(body.converted_image)
    }
}
