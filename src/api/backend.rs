use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    AnalyticsPageData, Document, DocumentDetail, FlashcardAttempt, QuizAttempt, SessionStarted,
    StartSessionRequest,
};

use super::DataSource;

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AppError::InvalidBackendUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("studyhall/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Pass 2xx responses through; otherwise surface the backend's
    /// `detail` message when it sent one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .map(|e| e.detail)
            .unwrap_or_default();

        Err(AppError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl DataSource for BackendClient {
    fn is_live(&self) -> bool {
        true
    }

    async fn ping(&self) -> Result<()> {
        let response = self.client.get(self.endpoint("/ping")).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let response = self.client.get(self.endpoint("/documents")).send().await?;
        let documents = Self::check(response).await?.json().await?;
        Ok(documents)
    }

    async fn document(&self, id: &str) -> Result<DocumentDetail> {
        let response = self
            .client
            .get(self.endpoint(&format!("/documents/{id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }

        let detail = Self::check(response).await?.json().await?;
        Ok(detail)
    }

    async fn upload_document(&self, title: &str, pdf_path: &Path) -> Result<Document> {
        let bytes = tokio::fs::read(pdf_path).await?;
        let file_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());

        let form = Form::new()
            .part(
                "pdf",
                Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/pdf")?,
            )
            .text("title", title.to_string());

        let response = self
            .client
            .post(self.endpoint("/documents/upload"))
            .multipart(form)
            .send()
            .await?;

        let document = Self::check(response).await?.json().await?;
        Ok(document)
    }

    async fn process_document(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("/documents/{id}/process")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn analytics_page(&self) -> Result<AnalyticsPageData> {
        let response = self
            .client
            .get(self.endpoint("/analytics/pagedata"))
            .send()
            .await?;
        let data = Self::check(response).await?.json().await?;
        Ok(data)
    }

    async fn start_session(&self, request: &StartSessionRequest) -> Result<SessionStarted> {
        let response = self
            .client
            .post(self.endpoint("/analytics/session/start"))
            .json(request)
            .send()
            .await?;
        let started = Self::check(response).await?.json().await?;
        Ok(started)
    }

    async fn end_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("/analytics/session/{session_id}/end")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn record_flashcard_attempt(&self, attempt: &FlashcardAttempt) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/analytics/flashcard/attempt"))
            .json(attempt)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn record_quiz_attempt(&self, attempt: &QuizAttempt) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/analytics/quiz/attempt"))
            .json(attempt)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
