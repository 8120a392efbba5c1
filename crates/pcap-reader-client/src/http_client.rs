use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::{
    AnalysisClient, AnalysisResult, CaptureFile, ChatAnswer, ChatRequest, ClientConfig, JobId,
    Result, TransportError,
};

/// HTTP client for the analysis service.
pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpAnalysisClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: config.timeout,
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }
}

/// Turn a received response into the typed payload or a typed failure.
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        tracing::warn!(status = status.as_u16(), body = %body, "analysis service returned an error");
        return Err(TransportError::backend(status.as_u16(), body));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| {
        tracing::error!(status = status.as_u16(), error = %err, "analysis service response did not decode");
        TransportError::MalformedResponse {
            status: status.as_u16(),
            reason: err.to_string(),
        }
    })
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn submit_capture(&self, file: CaptureFile) -> Result<AnalysisResult> {
        let analyze_url = self.url("/analyze/sip");
        let size = file.contents.len();
        tracing::info!(file = %file.file_name, bytes = size, "uploading capture");

        let part = Part::bytes(file.contents).file_name(file.file_name);
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&analyze_url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, url = %analyze_url, "capture upload failed");
                TransportError::from(err)
            })?;

        let result: AnalysisResult = decode_response(response).await?;
        tracing::info!(job_id = %result.job_id, total_calls = result.total_calls, "capture analyzed");
        Ok(result)
    }

    async fn submit_question(&self, job_id: &JobId, question: &str) -> Result<ChatAnswer> {
        let chat_url = self.url(&format!("/chat/{}", urlencoding::encode(job_id.as_str())));
        let request = ChatRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(&chat_url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, job_id = %job_id, "question could not be sent");
                TransportError::from(err)
            })?;

        decode_response(response).await
    }

    async fn health_check(&self) -> Result<()> {
        let health_url = self.url("/health");
        let response = self
            .client
            .get(&health_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::backend(status.as_u16(), body));
        }

        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
