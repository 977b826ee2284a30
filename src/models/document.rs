use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// The backend emits ISO-8601 timestamps without an offset, so these are
// NaiveDateTime rather than DateTime<Utc>.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// A document together with its generated study materials. `summary` and
/// `quiz` stay `None` (and `flashcards` empty) until processing completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub quiz: Option<Quiz>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    pub document_id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub document_id: String,
    pub question: String,
    pub answer: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub document_id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

/// `correct_answer` is the answer string itself and must be a member of
/// `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub quiz_id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_detail_payload() {
        // Shape and timestamp format as emitted by the backend.
        let json = r#"{
            "id": "doc-1",
            "title": "Intro to AI",
            "created_at": "2026-08-07T09:15:00.123456",
            "user_id": "default-user-id",
            "file_path": "/uploads/doc-1.pdf",
            "summary": {
                "id": "sum-doc-1",
                "document_id": "doc-1",
                "content": "A summary.",
                "created_at": "2026-08-07T09:16:00"
            },
            "flashcards": [],
            "quiz": null
        }"#;

        let detail: DocumentDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id, "doc-1");
        assert_eq!(detail.summary.as_ref().unwrap().content, "A summary.");
        assert!(detail.flashcards.is_empty());
        assert!(detail.quiz.is_none());
    }

    #[test]
    fn tolerates_unprocessed_document() {
        // Before processing, the generated fields may be missing entirely.
        let json = r#"{
            "id": "doc-2",
            "title": "Pending",
            "created_at": "2026-08-07T10:00:00"
        }"#;

        let detail: DocumentDetail = serde_json::from_str(json).unwrap();
        assert!(detail.summary.is_none());
        assert!(detail.flashcards.is_empty());
        assert!(detail.quiz.is_none());
    }
}
