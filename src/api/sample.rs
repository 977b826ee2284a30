use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AppError, Result};
use crate::models::{
    AnalyticsPageData, DatedStudyData, Document, DocumentDetail, DocumentPerformance, Flashcard,
    FlashcardAttempt, OverallAnalytics, Quiz, QuizAttempt, QuizQuestion, RecentQuizPerformance,
    SessionStarted, StartSessionRequest, Summary,
};

use super::DataSource;

pub const SAMPLE_DOCUMENT_ID: &str = "sample-doc";

/// Built-in illustrative dataset used when no backend is configured. The
/// study views stay fully explorable; anything recorded here is accepted
/// and dropped, and uploads fail fast with a configuration error.
pub struct SampleData {
    session_counter: AtomicU64,
}

impl SampleData {
    pub fn new() -> Self {
        Self {
            session_counter: AtomicU64::new(1),
        }
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new()
    }
}

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn sample_document() -> Document {
    Document {
        id: SAMPLE_DOCUMENT_ID.to_string(),
        title: "Sample Document: AI Fundamentals".to_string(),
        created_at: ts(2026, 6, 12, 9, 30),
        user_id: Some("default-user-id".to_string()),
        file_path: Some(format!("/uploads/{SAMPLE_DOCUMENT_ID}.pdf")),
    }
}

fn sample_detail() -> DocumentDetail {
    let doc = sample_document();
    let flashcards = vec![
        (
            "What is Artificial Intelligence?",
            "Artificial Intelligence is the simulation of human intelligence processes by machines, especially computer systems.",
        ),
        (
            "What are the main types of machine learning?",
            "Supervised learning, unsupervised learning, and reinforcement learning.",
        ),
        (
            "What is a neural network?",
            "A computing system inspired by biological neural networks that processes information using interconnected nodes.",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (question, answer))| Flashcard {
        id: format!("fc-{SAMPLE_DOCUMENT_ID}-{}", i + 1),
        document_id: doc.id.clone(),
        question: question.to_string(),
        answer: answer.to_string(),
        created_at: doc.created_at,
    })
    .collect();

    let quiz_id = format!("quiz-{SAMPLE_DOCUMENT_ID}");
    let questions = vec![
        (
            "Which of the following is a subset of AI focused on learning from data?",
            vec!["Machine Learning", "Computer Graphics", "Database Management", "Web Development"],
            "Machine Learning",
        ),
        (
            "What type of AI can perform any intellectual task that a human can do?",
            vec!["Narrow AI", "General AI", "Super AI", "Weak AI"],
            "General AI",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (question, options, correct))| QuizQuestion {
        id: format!("q-{SAMPLE_DOCUMENT_ID}-{}", i + 1),
        quiz_id: quiz_id.clone(),
        question: question.to_string(),
        options: options.into_iter().map(str::to_string).collect(),
        correct_answer: correct.to_string(),
        created_at: doc.created_at,
    })
    .collect();

    DocumentDetail {
        summary: Some(Summary {
            id: format!("sum-{SAMPLE_DOCUMENT_ID}"),
            document_id: doc.id.clone(),
            content: "This document provides a comprehensive introduction to Artificial \
                      Intelligence, covering key concepts such as machine learning, neural \
                      networks, natural language processing, and computer vision. It explores \
                      the historical development of AI, current applications across various \
                      industries, and future prospects for AI technology."
                .to_string(),
            created_at: doc.created_at,
        }),
        flashcards,
        quiz: Some(Quiz {
            id: quiz_id,
            document_id: doc.id.clone(),
            title: "AI Fundamentals Quiz".to_string(),
            created_at: doc.created_at,
            questions,
        }),
        id: doc.id,
        title: doc.title,
        created_at: doc.created_at,
        user_id: doc.user_id,
        file_path: doc.file_path,
    }
}

fn sample_analytics() -> AnalyticsPageData {
    AnalyticsPageData {
        overall_analytics: OverallAnalytics {
            total_study_time: 3600,
            current_streak: 3,
            longest_streak: 5,
            total_flashcards_seen: 50,
            total_flashcards_mastered: 30,
            flashcard_accuracy_overall: 75.0,
            total_quizzes_completed: 10,
            average_quiz_score_overall: 85.0,
            study_sessions_this_week_count: 5,
        },
        study_sessions_chart_data: [
            ("2026-06-06", 30, 1),
            ("2026-06-07", 45, 2),
            ("2026-06-08", 60, 2),
            ("2026-06-09", 30, 1),
            ("2026-06-10", 90, 3),
            ("2026-06-11", 60, 2),
            ("2026-06-12", 45, 2),
        ]
        .into_iter()
        .map(|(date, duration, sessions)| DatedStudyData {
            date: date.to_string(),
            duration,
            sessions,
        })
        .collect(),
        flashcard_performance_chart_data: [
            ("Introduction to AI", 85.0, 20),
            ("Machine Learning Basics", 75.0, 15),
            ("Neural Networks", 70.0, 10),
        ]
        .into_iter()
        .map(|(title, accuracy, attempts)| DocumentPerformance {
            document_title: title.to_string(),
            accuracy,
            attempts,
        })
        .collect(),
        quiz_performance_chart_data: [
            ("2026-06-01", 75.0, "AI Quiz 1"),
            ("2026-06-03", 80.0, "ML Quiz"),
            ("2026-06-06", 85.0, "NN Quiz"),
            ("2026-06-09", 90.0, "AI Quiz 2"),
            ("2026-06-12", 95.0, "Final Quiz"),
        ]
        .into_iter()
        .map(|(date, score, title)| RecentQuizPerformance {
            date: date.to_string(),
            score,
            quiz_title: title.to_string(),
        })
        .collect(),
    }
}

#[async_trait]
impl DataSource for SampleData {
    fn is_live(&self) -> bool {
        false
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::BackendNotConfigured)
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(vec![sample_document()])
    }

    async fn document(&self, id: &str) -> Result<DocumentDetail> {
        if id == SAMPLE_DOCUMENT_ID {
            Ok(sample_detail())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn upload_document(&self, _title: &str, _pdf_path: &Path) -> Result<Document> {
        Err(AppError::BackendNotConfigured)
    }

    async fn process_document(&self, _id: &str) -> Result<()> {
        Err(AppError::BackendNotConfigured)
    }

    async fn analytics_page(&self) -> Result<AnalyticsPageData> {
        Ok(sample_analytics())
    }

    async fn start_session(&self, _request: &StartSessionRequest) -> Result<SessionStarted> {
        let n = self.session_counter.fetch_add(1, Ordering::Relaxed);
        Ok(SessionStarted {
            id: format!("sample-session-{n}"),
        })
    }

    async fn end_session(&self, _session_id: &str) -> Result<()> {
        Ok(())
    }

    async fn record_flashcard_attempt(&self, _attempt: &FlashcardAttempt) -> Result<()> {
        Ok(())
    }

    async fn record_quiz_attempt(&self, _attempt: &QuizAttempt) -> Result<()> {
        Ok(())
    }
}
