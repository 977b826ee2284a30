use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{self, DataSource};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AnalyticsPageData, Document, DocumentDetail, FlashcardAttempt, OverallAnalytics, QuizAttempt,
    SessionStarted, StartSessionRequest,
};
use crate::study::{quiz, AnswerSheet, Difficulty, FlashcardSession, QuizScore};
use crate::tui::AppAction;
use crate::upload::{self, UploadForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Upload,
    Document,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyTab {
    #[default]
    Summary,
    Flashcards,
    Quiz,
}

impl StudyTab {
    pub fn next(self) -> Self {
        match self {
            Self::Summary => Self::Flashcards,
            Self::Flashcards => Self::Quiz,
            Self::Quiz => Self::Summary,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Summary => 0,
            Self::Flashcards => 1,
            Self::Quiz => 2,
        }
    }
}

/// Fetch state of the document view. Not-found and other fetch failures
/// both land in `Missing`; the distinction only goes to the log.
#[derive(Debug, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Ready(DocumentDetail),
    Missing,
}

// Messages from spawned fetch tasks back to the event loop. Each carries
// the epoch it was issued under; stale results are discarded on receipt.

struct DocumentsMsg {
    epoch: u64,
    result: Result<Vec<Document>>,
}

struct PageDataMsg {
    epoch: u64,
    result: Result<AnalyticsPageData>,
}

struct DetailMsg {
    epoch: u64,
    document_id: String,
    result: Result<DocumentDetail>,
}

struct UploadMsg {
    result: std::result::Result<String, String>,
}

struct SessionMsg {
    epoch: u64,
    result: Result<SessionStarted>,
}

pub struct App {
    pub view: View,
    pub user_id: String,
    pub source: Arc<dyn DataSource>,

    // Dashboard
    pub documents: Vec<Document>,
    pub documents_failed: bool,
    pub selected_index: usize,
    pub snapshot: OverallAnalytics,

    // Upload
    pub upload_form: UploadForm,
    pub upload_in_flight: bool,

    // Document view
    pub current_document_id: Option<String>,
    pub detail: DetailState,
    pub tab: StudyTab,
    pub study: FlashcardSession,
    pub session_pending: bool,
    pub sheet: AnswerSheet,
    pub quiz_cursor: usize,
    pub quiz_result: Option<QuizScore>,

    // Analytics
    pub analytics: AnalyticsPageData,
    pub analytics_failed: bool,

    pub show_help: bool,

    // Bumped on every navigation so responses belonging to a view the
    // user already left never update state.
    epoch: u64,

    documents_tx: mpsc::Sender<DocumentsMsg>,
    documents_rx: mpsc::Receiver<DocumentsMsg>,
    pagedata_tx: mpsc::Sender<PageDataMsg>,
    pagedata_rx: mpsc::Receiver<PageDataMsg>,
    detail_tx: mpsc::Sender<DetailMsg>,
    detail_rx: mpsc::Receiver<DetailMsg>,
    upload_tx: mpsc::Sender<UploadMsg>,
    upload_rx: mpsc::Receiver<UploadMsg>,
    session_tx: mpsc::Sender<SessionMsg>,
    session_rx: mpsc::Receiver<SessionMsg>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let source = api::for_config(config)?;
        Ok(Self::with_source(source, config.user_id.clone()))
    }

    pub fn with_source(source: Arc<dyn DataSource>, user_id: String) -> Self {
        let (documents_tx, documents_rx) = mpsc::channel(8);
        let (pagedata_tx, pagedata_rx) = mpsc::channel(8);
        let (detail_tx, detail_rx) = mpsc::channel(8);
        let (upload_tx, upload_rx) = mpsc::channel(8);
        let (session_tx, session_rx) = mpsc::channel(8);

        Self {
            view: View::Dashboard,
            user_id,
            source,
            documents: Vec::new(),
            documents_failed: false,
            selected_index: 0,
            snapshot: OverallAnalytics::default(),
            upload_form: UploadForm::default(),
            upload_in_flight: false,
            current_document_id: None,
            detail: DetailState::default(),
            tab: StudyTab::default(),
            study: FlashcardSession::new(0),
            session_pending: false,
            sheet: AnswerSheet::new(),
            quiz_cursor: 0,
            quiz_result: None,
            analytics: AnalyticsPageData::default(),
            analytics_failed: false,
            show_help: false,
            epoch: 0,
            documents_tx,
            documents_rx,
            pagedata_tx,
            pagedata_rx,
            detail_tx,
            detail_rx,
            upload_tx,
            upload_rx,
            session_tx,
            session_rx,
        }
    }

    // Navigation. Every entry re-issues the view's fetches from scratch.

    pub fn open_dashboard(&mut self) {
        self.view = View::Dashboard;
        self.show_help = false;
        let epoch = self.bump_epoch();
        self.spawn_documents_fetch(epoch);
        self.spawn_pagedata_fetch(epoch);
    }

    pub fn open_upload(&mut self) {
        self.view = View::Upload;
        self.show_help = false;
        self.upload_form.reset();
        self.bump_epoch();
    }

    pub fn open_document(&mut self, id: String) {
        self.view = View::Document;
        self.show_help = false;
        self.tab = StudyTab::Summary;
        self.detail = DetailState::Loading;
        self.study = FlashcardSession::new(0);
        self.session_pending = false;
        self.sheet.clear();
        self.quiz_cursor = 0;
        self.quiz_result = None;
        self.current_document_id = Some(id.clone());
        let epoch = self.bump_epoch();
        self.spawn_detail_fetch(epoch, id);
    }

    pub fn open_analytics(&mut self) {
        self.view = View::Analytics;
        self.show_help = false;
        let epoch = self.bump_epoch();
        self.spawn_pagedata_fetch(epoch);
    }

    pub fn refresh(&mut self) {
        match self.view {
            View::Dashboard => self.open_dashboard(),
            View::Analytics => self.open_analytics(),
            View::Document => {
                if let Some(id) = self.current_document_id.clone() {
                    self.open_document(id);
                }
            }
            View::Upload => {}
        }
    }

    fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    // Fetch tasks. Independent, unordered, no retries; one failing never
    // cancels another.

    fn spawn_documents_fetch(&self, epoch: u64) {
        let source = Arc::clone(&self.source);
        let tx = self.documents_tx.clone();
        tokio::spawn(async move {
            let result = source.list_documents().await;
            let _ = tx.send(DocumentsMsg { epoch, result }).await;
        });
    }

    fn spawn_pagedata_fetch(&self, epoch: u64) {
        let source = Arc::clone(&self.source);
        let tx = self.pagedata_tx.clone();
        tokio::spawn(async move {
            let result = source.analytics_page().await;
            let _ = tx.send(PageDataMsg { epoch, result }).await;
        });
    }

    fn spawn_detail_fetch(&self, epoch: u64, document_id: String) {
        let source = Arc::clone(&self.source);
        let tx = self.detail_tx.clone();
        tokio::spawn(async move {
            let result = source.document(&document_id).await;
            let _ = tx
                .send(DetailMsg {
                    epoch,
                    document_id,
                    result,
                })
                .await;
        });
    }

    /// Drain completed fetch results (non-blocking), called once per event
    /// loop iteration.
    pub fn poll_results(&mut self) {
        while let Ok(msg) = self.documents_rx.try_recv() {
            if msg.epoch != self.epoch {
                continue;
            }
            match msg.result {
                Ok(documents) => {
                    self.documents = documents;
                    self.documents_failed = false;
                    if self.selected_index >= self.documents.len() {
                        self.selected_index = 0;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to fetch documents: {e}");
                    self.documents = Vec::new();
                    self.documents_failed = true;
                    self.selected_index = 0;
                }
            }
        }

        while let Ok(msg) = self.pagedata_rx.try_recv() {
            if msg.epoch != self.epoch {
                continue;
            }
            match msg.result {
                Ok(data) => {
                    self.snapshot = data.overall_analytics.clone();
                    self.analytics = data;
                    self.analytics_failed = false;
                }
                Err(e) => {
                    tracing::warn!("failed to fetch analytics: {e}");
                    self.snapshot = OverallAnalytics::default();
                    self.analytics = AnalyticsPageData::default();
                    self.analytics_failed = true;
                }
            }
        }

        while let Ok(msg) = self.detail_rx.try_recv() {
            if msg.epoch != self.epoch
                || self.current_document_id.as_deref() != Some(msg.document_id.as_str())
            {
                continue;
            }
            match msg.result {
                Ok(detail) => {
                    self.study = FlashcardSession::new(detail.flashcards.len());
                    self.detail = DetailState::Ready(detail);
                }
                Err(AppError::NotFound) => {
                    tracing::info!("document {} not found", msg.document_id);
                    self.detail = DetailState::Missing;
                }
                Err(e) => {
                    tracing::warn!("failed to fetch document {}: {e}", msg.document_id);
                    self.detail = DetailState::Missing;
                }
            }
        }

        while let Ok(msg) = self.upload_rx.try_recv() {
            self.upload_in_flight = false;
            match msg.result {
                Ok(document_id) => {
                    self.upload_form.reset();
                    self.open_document(document_id);
                }
                Err(message) => {
                    self.upload_form.error = Some(message);
                }
            }
        }

        while let Ok(msg) = self.session_rx.try_recv() {
            if msg.epoch != self.epoch {
                continue;
            }
            self.session_pending = false;
            match msg.result {
                Ok(started) => self.study.begin(started.id),
                // Start failure keeps the study state machine untouched.
                Err(e) => tracing::warn!("failed to start study session: {e}"),
            }
        }
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::ShowHelp => self.show_help = true,
            AppAction::HideHelp => self.show_help = false,

            AppAction::Back | AppAction::FormCancel => {
                self.open_dashboard();
            }
            AppAction::GoUpload => self.open_upload(),
            AppAction::GoAnalytics => self.open_analytics(),
            AppAction::Refresh => self.refresh(),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            AppAction::MoveDown => {
                if !self.documents.is_empty() && self.selected_index < self.documents.len() - 1 {
                    self.selected_index += 1;
                }
            }
            AppAction::OpenSelected => {
                if let Some(document) = self.documents.get(self.selected_index) {
                    let id = document.id.clone();
                    self.open_document(id);
                }
            }

            AppAction::FormChar(c) => self.upload_form.push_char(c),
            AppAction::FormBackspace => self.upload_form.backspace(),
            AppAction::FormToggleFocus => self.upload_form.toggle_focus(),
            AppAction::FormSubmit => self.submit_upload(),

            AppAction::NextTab => self.tab = self.tab.next(),

            AppAction::StartStudy => self.start_study(),
            AppAction::NextCard => self.study.advance(),
            AppAction::PrevCard => self.study.retreat(),
            AppAction::ToggleAnswer => self.study.toggle_answer(),
            AppAction::Rate(difficulty) => self.rate_current_card(difficulty),
            AppAction::EndStudy => self.end_study(),

            AppAction::QuizUp => self.quiz_cursor = self.quiz_cursor.saturating_sub(1),
            AppAction::QuizDown => {
                let len = self.quiz_len();
                if len > 0 && self.quiz_cursor < len - 1 {
                    self.quiz_cursor += 1;
                }
            }
            AppAction::SelectOption(n) => self.select_option(n),
            AppAction::SubmitQuiz => self.submit_quiz(),
        }

        Ok(false)
    }

    fn submit_upload(&mut self) {
        if self.upload_in_flight {
            return;
        }
        if !self.upload_form.attach() {
            return;
        }
        if !self.upload_form.can_submit() {
            self.upload_form.error = Some("A title is required.".to_string());
            return;
        }
        // Fail fast before any network attempt when unconfigured.
        if !self.source.is_live() {
            self.upload_form.error = Some(AppError::BackendNotConfigured.user_message());
            return;
        }

        let title = self.upload_form.title.trim().to_string();
        let Some(pdf_path) = self.upload_form.attached.clone() else {
            return;
        };

        self.upload_in_flight = true;
        self.upload_form.error = None;
        let source = Arc::clone(&self.source);
        let tx = self.upload_tx.clone();
        tokio::spawn(async move {
            let result = upload::upload_and_process(source.as_ref(), &title, &pdf_path)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(UploadMsg { result }).await;
        });
    }

    fn start_study(&mut self) {
        if self.session_pending || !self.study.can_start() {
            return;
        }
        let Some(document_id) = self.current_document_id.clone() else {
            return;
        };

        self.session_pending = true;
        let request = StartSessionRequest::flashcards(&self.user_id, &document_id);
        let source = Arc::clone(&self.source);
        let tx = self.session_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = source.start_session(&request).await;
            let _ = tx.send(SessionMsg { epoch, result }).await;
        });
    }

    fn rate_current_card(&mut self, difficulty: Difficulty) {
        let DetailState::Ready(detail) = &self.detail else {
            return;
        };
        let (Some(index), Some(session_id)) =
            (self.study.current_index(), self.study.session_id())
        else {
            return;
        };
        let Some(card) = detail.flashcards.get(index) else {
            return;
        };

        let attempt = FlashcardAttempt {
            user_id: self.user_id.clone(),
            flashcard_id: card.id.clone(),
            is_correct: difficulty.counts_as_correct(),
            difficulty_rating: Some(difficulty.rating()),
            session_id: session_id.to_string(),
        };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            // Best effort; the card advances regardless.
            if let Err(e) = source.record_flashcard_attempt(&attempt).await {
                tracing::warn!("failed to record flashcard attempt: {e}");
            }
        });

        self.study.advance();
    }

    fn end_study(&mut self) {
        let Some(session_id) = self.study.finish() else {
            // No active session: no network call, no state change.
            return;
        };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            if let Err(e) = source.end_session(&session_id).await {
                tracing::warn!("failed to end study session: {e}");
            }
        });
    }

    fn quiz_len(&self) -> usize {
        match &self.detail {
            DetailState::Ready(detail) => detail.quiz.as_ref().map_or(0, |q| q.questions.len()),
            _ => 0,
        }
    }

    fn select_option(&mut self, option_index: usize) {
        let DetailState::Ready(detail) = &self.detail else {
            return;
        };
        let Some(quiz) = &detail.quiz else {
            return;
        };
        let Some(question) = quiz.questions.get(self.quiz_cursor) else {
            return;
        };
        let Some(option) = question.options.get(option_index) else {
            return;
        };
        self.sheet.select(&question.id, option);
    }

    fn submit_quiz(&mut self) {
        let DetailState::Ready(detail) = &self.detail else {
            return;
        };
        let Some(active_quiz) = &detail.quiz else {
            return;
        };
        // Empty quizzes are never submitted.
        let Some(result) = quiz::score(&active_quiz.questions, &self.sheet) else {
            return;
        };

        let attempt = QuizAttempt {
            user_id: self.user_id.clone(),
            quiz_id: active_quiz.id.clone(),
            score: f64::from(result.percent),
            total_questions: result.total,
            correct_answers: result.correct,
        };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            if let Err(e) = source.record_quiz_attempt(&attempt).await {
                tracing::warn!("failed to record quiz attempt: {e}");
            }
        });

        self.quiz_result = Some(result);
    }
}
