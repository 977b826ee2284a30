use std::path::{Path, PathBuf};

use crate::api::DataSource;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    #[default]
    Title,
    File,
}

/// Upload form state. A file only enters form state once `attach` accepts
/// it, and only PDF paths are accepted.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: String,
    pub path_input: String,
    pub attached: Option<PathBuf>,
    pub focus: UploadField,
    pub error: Option<String>,
}

impl UploadForm {
    /// Validate the typed path and take it into form state. Non-PDF paths
    /// are rejected and leave the form without an attached file.
    pub fn attach(&mut self) -> bool {
        let trimmed = self.path_input.trim();
        if trimmed.is_empty() {
            self.attached = None;
            self.error = Some("Enter the path of a PDF file.".to_string());
            return false;
        }

        let path = Path::new(trimmed);
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if !is_pdf {
            self.attached = None;
            self.error = Some("Only PDF files can be uploaded.".to_string());
            return false;
        }

        self.attached = Some(path.to_path_buf());
        self.error = None;
        true
    }

    /// Submission needs an attached file and a non-empty title.
    pub fn can_submit(&self) -> bool {
        self.attached.is_some() && !self.title.trim().is_empty()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            UploadField::Title => UploadField::File,
            UploadField::File => UploadField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            UploadField::Title => self.title.push(c),
            UploadField::File => {
                self.path_input.push(c);
                // The typed path no longer matches what was validated.
                self.attached = None;
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            UploadField::Title => {
                self.title.pop();
            }
            UploadField::File => {
                self.path_input.pop();
                self.attached = None;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The two-step upload flow: create the document, then trigger content
/// generation. Fails fast with a configuration error when no backend is
/// configured. A failure after the first step leaves an orphaned document
/// server-side; that is reported, never retried here.
pub async fn upload_and_process(
    source: &dyn DataSource,
    title: &str,
    pdf_path: &Path,
) -> Result<String> {
    if !source.is_live() {
        return Err(AppError::BackendNotConfigured);
    }

    let document = source.upload_document(title, pdf_path).await?;
    source.process_document(&document.id).await?;
    Ok(document.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendClient, SampleData};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_non_pdf_paths() {
        let mut form = UploadForm::default();
        form.path_input = "/tmp/notes.txt".to_string();
        assert!(!form.attach());
        assert!(form.attached.is_none());
        assert!(form.error.is_some());
    }

    #[test]
    fn accepts_pdf_paths_case_insensitively() {
        let mut form = UploadForm::default();
        form.path_input = "/tmp/Notes.PDF".to_string();
        assert!(form.attach());
        assert_eq!(form.attached.as_deref(), Some(Path::new("/tmp/Notes.PDF")));
        assert!(form.error.is_none());
    }

    #[test]
    fn submission_requires_title_and_file() {
        let mut form = UploadForm::default();
        form.path_input = "/tmp/notes.pdf".to_string();
        form.attach();
        assert!(!form.can_submit());

        form.title = "Notes".to_string();
        assert!(form.can_submit());

        form.title = "   ".to_string();
        assert!(!form.can_submit());
    }

    #[test]
    fn editing_the_path_detaches_the_file() {
        let mut form = UploadForm::default();
        form.path_input = "/tmp/notes.pdf".to_string();
        form.attach();
        assert!(form.attached.is_some());

        form.focus = UploadField::File;
        form.push_char('x');
        assert!(form.attached.is_none());
    }

    #[tokio::test]
    async fn fails_fast_without_a_backend() {
        let sample = SampleData::new();
        let result = upload_and_process(&sample, "Notes", Path::new("/tmp/notes.pdf")).await;
        assert!(matches!(result, Err(AppError::BackendNotConfigured)));
    }

    #[tokio::test]
    async fn uploads_then_processes_then_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "doc-1", "title": "Notes", "created_at": "2026-08-07T10:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/documents/doc-1/process"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success", "document_id": "doc-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("notes.pdf");
        std::fs::write(&pdf, b"%PDF-1.4 fake").unwrap();

        let client = BackendClient::new(&server.uri(), 5).unwrap();
        let id = upload_and_process(&client, "Notes", &pdf).await.unwrap();
        assert_eq!(id, "doc-1");
    }

    #[tokio::test]
    async fn processing_failure_aborts_with_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "doc-1", "title": "Notes", "created_at": "2026-08-07T10:00:00"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/documents/doc-1/process"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "detail": "Error processing PDF"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("notes.pdf");
        std::fs::write(&pdf, b"%PDF-1.4 fake").unwrap();

        let client = BackendClient::new(&server.uri(), 5).unwrap();
        let err = upload_and_process(&client, "Notes", &pdf).await.unwrap_err();
        assert_eq!(err.user_message(), "Error processing PDF");
    }
}
