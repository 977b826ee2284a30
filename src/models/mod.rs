mod analytics;
mod document;

pub use analytics::{
    AnalyticsPageData, DatedStudyData, DocumentPerformance, FlashcardAttempt, OverallAnalytics,
    QuizAttempt, RecentQuizPerformance, SessionStarted, StartSessionRequest,
};
pub use document::{Document, DocumentDetail, Flashcard, Quiz, QuizQuestion, Summary};
