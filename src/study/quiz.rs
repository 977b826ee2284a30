use std::collections::HashMap;

use crate::models::QuizQuestion;

/// The user's selected option per question id. Re-selecting a question
/// replaces the earlier choice; only the latest selection counts.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    selected: HashMap<String, String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, question_id: &str, option: &str) {
        self.selected
            .insert(question_id.to_string(), option.to_string());
    }

    pub fn selection(&self, question_id: &str) -> Option<&str> {
        self.selected.get(question_id).map(String::as_str)
    }

    pub fn answered(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
    /// `round(100 * correct / total)`.
    pub percent: u32,
}

/// Score a quiz locally against the correct answers already fetched.
/// Returns `None` for an empty quiz; submission must not be invoked then.
pub fn score(questions: &[QuizQuestion], sheet: &AnswerSheet) -> Option<QuizScore> {
    if questions.is_empty() {
        return None;
    }

    let correct = questions
        .iter()
        .filter(|q| sheet.selection(&q.id) == Some(q.correct_answer.as_str()))
        .count() as u32;
    let total = questions.len() as u32;
    let percent = (100.0 * f64::from(correct) / f64::from(total)).round() as u32;

    Some(QuizScore {
        correct,
        total,
        percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn question(id: &str, options: &[&str], correct: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            quiz_id: "quiz-1".to_string(),
            question: format!("Question {id}?"),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: correct.to_string(),
            created_at: NaiveDateTime::MIN,
        }
    }

    #[test]
    fn latest_selection_wins() {
        let mut sheet = AnswerSheet::new();
        sheet.select("q-1", "A");
        sheet.select("q-1", "B");
        assert_eq!(sheet.selection("q-1"), Some("B"));
        assert_eq!(sheet.answered(), 1);
    }

    #[test]
    fn empty_quiz_is_not_scored() {
        assert_eq!(score(&[], &AnswerSheet::new()), None);
    }

    #[test]
    fn counts_exact_answer_matches() {
        let questions = vec![
            question("q-1", &["A", "B"], "B"),
            question("q-2", &["A", "B", "C"], "A"),
            question("q-3", &["Yes", "No"], "No"),
        ];

        let mut sheet = AnswerSheet::new();
        sheet.select("q-1", "B"); // correct
        sheet.select("q-2", "C"); // wrong
                                  // q-3 left unanswered

        let result = score(&questions, &sheet).unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.percent, 33);
    }

    #[test]
    fn matches_reference_computation() {
        // Reference: count of questions whose mapped answer equals the
        // correct answer, percent = round(100 * correct / total).
        let questions: Vec<QuizQuestion> = (0..7)
            .map(|i| question(&format!("q-{i}"), &["A", "B"], if i % 2 == 0 { "A" } else { "B" }))
            .collect();

        let mut sheet = AnswerSheet::new();
        for q in &questions {
            sheet.select(&q.id, "A");
        }

        let reference_correct = questions
            .iter()
            .filter(|q| sheet.selection(&q.id) == Some(q.correct_answer.as_str()))
            .count() as u32;
        let reference_percent =
            (100.0 * f64::from(reference_correct) / questions.len() as f64).round() as u32;

        let result = score(&questions, &sheet).unwrap();
        assert_eq!(result.correct, reference_correct);
        assert_eq!(result.percent, reference_percent);
        assert_eq!(result.correct, 4);
        assert_eq!(result.percent, 57);
    }

    #[test]
    fn perfect_single_question_quiz() {
        let questions = vec![question("q-1", &["A", "B"], "B")];
        let mut sheet = AnswerSheet::new();
        sheet.select("q-1", "B");

        let result = score(&questions, &sheet).unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 1);
        assert_eq!(result.percent, 100);
    }
}
