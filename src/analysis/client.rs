use super::result::{AnalysisResult, HistoryEntry};
use crate::capture::AudioArtifact;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{error, info};

/// Multipart field name the analysis endpoint expects.
const AUDIO_FIELD: &str = "audio";

/// Fixed upload filename; the backend keys its temp storage on this.
const AUDIO_FILENAME: &str = "recording.wav";

/// Failures at the analysis-service boundary.
///
/// Network errors, non-2xx statuses, and malformed JSON all collapse into
/// `SubmissionFailed` / `RefreshFailed`: the caller's handling is the same
/// for each (resolve the session empty, or keep the stale history).
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis submission failed: {0}")]
    SubmissionFailed(String),

    #[error("history refresh failed: {0}")]
    RefreshFailed(String),
}

/// Boundary to the remote analysis service.
///
/// The HTTP implementation is the only production one; tests substitute a
/// canned backend so the coordinator can be exercised without a server.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a captured artifact for analysis. One attempt, no retry.
    async fn submit(&self, artifact: &AudioArtifact) -> Result<AnalysisResult, AnalysisError>;

    /// Fetch the authoritative recording history.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, AnalysisError>;
}

/// HTTP client for the analysis service.
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn submit(&self, artifact: &AudioArtifact) -> Result<AnalysisResult, AnalysisError> {
        let bytes = tokio::fs::read(&artifact.path)
            .await
            .map_err(|e| AnalysisError::SubmissionFailed(format!("read artifact: {}", e)))?;

        info!(
            "Submitting recording for analysis: {} ({} bytes, {:.1}s)",
            artifact.path.display(),
            bytes.len(),
            artifact.duration_seconds
        );

        let part = Part::bytes(bytes)
            .file_name(AUDIO_FILENAME)
            .mime_str("audio/wav")
            .map_err(|e| AnalysisError::SubmissionFailed(e.to_string()))?;

        let form = Form::new().part(AUDIO_FIELD, part);

        let response = self
            .http
            .post(format!("{}/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::SubmissionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Analysis endpoint returned {}: {}", status, body);
            return Err(AnalysisError::SubmissionFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let result: AnalysisResult = response
            .json()
            .await
            .map_err(|e| AnalysisError::SubmissionFailed(format!("malformed response: {}", e)))?;

        info!(
            "Analysis response received (transcription: {}, emotion: {}, wpm: {})",
            result.transcription.is_some(),
            result.emotion_info.is_some(),
            result.wpm_info.is_some()
        );

        Ok(result)
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, AnalysisError> {
        let response = self
            .http
            .get(format!("{}/recordings", self.base_url))
            .send()
            .await
            .map_err(|e| AnalysisError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::RefreshFailed(format!("HTTP {}", status)));
        }

        let entries: Vec<HistoryEntry> = response
            .json()
            .await
            .map_err(|e| AnalysisError::RefreshFailed(format!("malformed response: {}", e)))?;

        info!("Fetched {} history entries", entries.len());

        Ok(entries)
    }
}
