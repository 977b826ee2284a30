use serde::{Deserialize, Serialize};

// Aggregate counters computed server-side from all historical sessions and
// attempts. Every field defaults so a sparse or partial payload still
// deserializes; display code additionally zeroes non-finite floats.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAnalytics {
    /// Total study time in seconds.
    #[serde(default)]
    pub total_study_time: u64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_flashcards_seen: u32,
    #[serde(default)]
    pub total_flashcards_mastered: u32,
    #[serde(default)]
    pub flashcard_accuracy_overall: f64,
    #[serde(default)]
    pub total_quizzes_completed: u32,
    #[serde(default)]
    pub average_quiz_score_overall: f64,
    #[serde(default)]
    pub study_sessions_this_week_count: u32,
}

/// One day in the 7-day study-time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedStudyData {
    #[serde(default)]
    pub date: String,
    /// Minutes studied that day.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub sessions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPerformance {
    #[serde(default)]
    pub document_title: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentQuizPerformance {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub quiz_title: String,
}

/// Everything the analytics view needs, in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPageData {
    #[serde(default)]
    pub overall_analytics: OverallAnalytics,
    #[serde(default)]
    pub study_sessions_chart_data: Vec<DatedStudyData>,
    #[serde(default)]
    pub flashcard_performance_chart_data: Vec<DocumentPerformance>,
    #[serde(default)]
    pub quiz_performance_chart_data: Vec<RecentQuizPerformance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    pub document_id: String,
    pub session_type: String,
}

impl StartSessionRequest {
    pub fn flashcards(user_id: &str, document_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            document_id: document_id.to_string(),
            session_type: "flashcard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStarted {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashcardAttempt {
    pub user_id: String,
    pub flashcard_id: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<u8>,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizAttempt {
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_deserializes_to_defaults() {
        let data: AnalyticsPageData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.overall_analytics.total_study_time, 0);
        assert_eq!(data.overall_analytics.flashcard_accuracy_overall, 0.0);
        assert!(data.study_sessions_chart_data.is_empty());
        assert!(data.quiz_performance_chart_data.is_empty());
    }

    #[test]
    fn parses_backend_page_payload() {
        let json = r#"{
            "overall_analytics": {
                "total_study_time": 3600,
                "current_streak": 3,
                "longest_streak": 5,
                "total_flashcards_seen": 50,
                "total_flashcards_mastered": 30,
                "flashcard_accuracy_overall": 75.0,
                "total_quizzes_completed": 10,
                "average_quiz_score_overall": 85.0,
                "study_sessions_this_week_count": 5
            },
            "study_sessions_chart_data": [
                {"date": "2026-08-01", "duration": 30, "sessions": 1}
            ],
            "flashcard_performance_chart_data": [
                {"document_title": "Intro to AI", "accuracy": 85.0, "attempts": 20}
            ],
            "quiz_performance_chart_data": [
                {"date": "2026-08-01", "score": 75.0, "quiz_title": "AI Quiz 1"}
            ]
        }"#;

        let data: AnalyticsPageData = serde_json::from_str(json).unwrap();
        assert_eq!(data.overall_analytics.current_streak, 3);
        assert_eq!(data.study_sessions_chart_data[0].duration, 30);
        assert_eq!(data.flashcard_performance_chart_data[0].attempts, 20);
        assert_eq!(data.quiz_performance_chart_data[0].score, 75.0);
    }

    #[test]
    fn flashcard_attempt_omits_missing_rating() {
        let attempt = FlashcardAttempt {
            user_id: "u".to_string(),
            flashcard_id: "fc".to_string(),
            is_correct: true,
            difficulty_rating: None,
            session_id: "s".to_string(),
        };
        let json = serde_json::to_string(&attempt).unwrap();
        assert!(!json.contains("difficulty_rating"));
    }
}
