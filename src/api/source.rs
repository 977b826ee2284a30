use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AnalyticsPageData, Document, DocumentDetail, FlashcardAttempt, QuizAttempt, SessionStarted,
    StartSessionRequest,
};

use super::{BackendClient, SampleData};

/// Where page data comes from. One implementation talks to the live
/// backend, the other serves a fixed sample dataset when no backend is
/// configured; views never know which one they are holding.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// False for the sample source; drives the demo-mode banner and the
    /// fail-fast configuration error in the upload flow.
    fn is_live(&self) -> bool;

    async fn ping(&self) -> Result<()>;

    async fn list_documents(&self) -> Result<Vec<Document>>;

    async fn document(&self, id: &str) -> Result<DocumentDetail>;

    async fn upload_document(&self, title: &str, pdf_path: &Path) -> Result<Document>;

    async fn process_document(&self, id: &str) -> Result<()>;

    async fn analytics_page(&self) -> Result<AnalyticsPageData>;

    async fn start_session(&self, request: &StartSessionRequest) -> Result<SessionStarted>;

    async fn end_session(&self, session_id: &str) -> Result<()>;

    async fn record_flashcard_attempt(&self, attempt: &FlashcardAttempt) -> Result<()>;

    async fn record_quiz_attempt(&self, attempt: &QuizAttempt) -> Result<()>;
}

/// Select the data source once, from configuration.
pub fn for_config(config: &Config) -> Result<Arc<dyn DataSource>> {
    match config.backend_url.as_deref() {
        Some(url) => Ok(Arc::new(BackendClient::new(
            url,
            config.request_timeout_secs,
        )?)),
        None => {
            tracing::warn!("no backend_url configured, falling back to sample data");
            Ok(Arc::new(SampleData::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_backend_selects_sample_source() {
        let source = for_config(&Config::default()).unwrap();
        assert!(!source.is_live());
    }

    #[test]
    fn configured_backend_selects_live_source() {
        let config = Config {
            backend_url: Some("http://localhost:8000".to_string()),
            ..Config::default()
        };
        let source = for_config(&config).unwrap();
        assert!(source.is_live());
    }

    #[test]
    fn invalid_backend_url_is_a_configuration_error() {
        let config = Config {
            backend_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(for_config(&config).is_err());
    }
}
