/**
 * Media Service Client
 *
 * HTTP client for the external media service. Takes a staged local file,
 * posts it as multipart form data, and returns the persistent URL from the
 * service's JSON response.
 *
 * The staged local file is deleted on both outcomes; no retries are
 * attempted and failures surface immediately to the caller.
 */

use serde::Deserialize;
use thiserror::Error;

use crate::media::staging::StagedFile;
use crate::server::config::MediaConfig;

/// Errors from the media upload path
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read staged file: {0}")]
    Staging(#[from] std::io::Error),
    #[error("media service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("media service returned status {0}")]
    Status(u16),
    #[error("media service response missing url")]
    MissingUrl,
}

/// Successful upload response body
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client for the external media service
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    upload_url: String,
    api_key: String,
}

impl MediaClient {
    /// Build a client from media configuration
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: config.upload_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Upload a staged file and return its persistent URL
    ///
    /// Consumes the staged file: the local copy is removed whether the
    /// upload succeeds or fails.
    pub async fn upload(&self, staged: StagedFile) -> Result<String, MediaError> {
        let result = self.send(&staged).await;
        staged.discard().await;

        match &result {
            Ok(url) => tracing::info!("media upload complete: {}", url),
            Err(e) => tracing::warn!("media upload failed: {}", e),
        }
        result
    }

    async fn send(&self, staged: &StagedFile) -> Result<String, MediaError> {
        let bytes = staged.read().await?;

        let part =
            reqwest::multipart::Part::bytes(bytes).file_name(staged.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http.post(&self.upload_url).multipart(form);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MediaError::Status(response.status().as_u16()));
        }

        let body: UploadResponse = response.json().await.map_err(|_| MediaError::MissingUrl)?;
        Ok(body.url)
    }
}
