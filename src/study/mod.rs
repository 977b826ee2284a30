mod flashcards;
pub mod numeric;
pub mod quiz;

pub use flashcards::{Difficulty, FlashcardSession, StudyPhase};
pub use quiz::{AnswerSheet, QuizScore};
