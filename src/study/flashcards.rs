use std::time::{Duration, Instant};

/// Self-assessed recall difficulty for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Hard,
    Medium,
    Easy,
}

impl Difficulty {
    /// Fixed ordinal recorded with the attempt.
    pub fn rating(self) -> u8 {
        match self {
            Self::Hard => 1,
            Self::Medium => 3,
            Self::Easy => 5,
        }
    }

    /// Hard counts as an incorrect recall; the raw rating is recorded
    /// alongside, so the coarser flag loses nothing.
    pub fn counts_as_correct(self) -> bool {
        !matches!(self, Self::Hard)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::Medium => "Medium",
            Self::Easy => "Easy",
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Hard),
            '2' => Some(Self::Medium),
            '3' => Some(Self::Easy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyPhase {
    #[default]
    NotStarted,
    Active {
        index: usize,
        show_answer: bool,
    },
    Ended,
}

/// Client-side flashcard study session: which card is up, whether the
/// answer is revealed, and the backend session it reports into. Activation
/// happens only after the backend confirms the session, so a failed start
/// leaves the phase untouched.
#[derive(Debug)]
pub struct FlashcardSession {
    deck_size: usize,
    phase: StudyPhase,
    session_id: Option<String>,
    started_at: Option<Instant>,
}

impl FlashcardSession {
    pub fn new(deck_size: usize) -> Self {
        Self {
            deck_size,
            phase: StudyPhase::NotStarted,
            session_id: None,
            started_at: None,
        }
    }

    pub fn phase(&self) -> StudyPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, StudyPhase::Active { .. })
    }

    /// A session can begin from NotStarted or again after Ended, but never
    /// over an empty deck.
    pub fn can_start(&self) -> bool {
        self.deck_size > 0 && !self.is_active()
    }

    pub fn begin(&mut self, session_id: String) {
        if !self.can_start() {
            return;
        }
        self.phase = StudyPhase::Active {
            index: 0,
            show_answer: false,
        };
        self.session_id = Some(session_id);
        self.started_at = Some(Instant::now());
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            StudyPhase::Active { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn showing_answer(&self) -> bool {
        matches!(
            self.phase,
            StudyPhase::Active {
                show_answer: true,
                ..
            }
        )
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|t| t.elapsed())
    }

    /// Move to the next card, wrapping past the end. Hides the answer.
    pub fn advance(&mut self) {
        if let StudyPhase::Active { index, .. } = self.phase {
            self.phase = StudyPhase::Active {
                index: (index + 1) % self.deck_size,
                show_answer: false,
            };
        }
    }

    /// Move to the previous card, wrapping before the start. Hides the
    /// answer.
    pub fn retreat(&mut self) {
        if let StudyPhase::Active { index, .. } = self.phase {
            self.phase = StudyPhase::Active {
                index: (index + self.deck_size - 1) % self.deck_size,
                show_answer: false,
            };
        }
    }

    pub fn toggle_answer(&mut self) {
        if let StudyPhase::Active { index, show_answer } = self.phase {
            self.phase = StudyPhase::Active {
                index,
                show_answer: !show_answer,
            };
        }
    }

    /// End the session. Returns the backend session id to terminate if and
    /// only if both the id and the start time are present; otherwise this
    /// is a no-op and no network call must be made.
    pub fn finish(&mut self) -> Option<String> {
        match (self.session_id.take(), self.started_at.take()) {
            (Some(id), Some(_)) => {
                self.phase = StudyPhase::Ended;
                Some(id)
            }
            (id, started_at) => {
                self.session_id = id;
                self.started_at = started_at;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_ordinals_are_fixed() {
        assert_eq!(Difficulty::Hard.rating(), 1);
        assert_eq!(Difficulty::Medium.rating(), 3);
        assert_eq!(Difficulty::Easy.rating(), 5);
    }

    #[test]
    fn hard_is_the_only_incorrect_rating() {
        assert!(!Difficulty::Hard.counts_as_correct());
        assert!(Difficulty::Medium.counts_as_correct());
        assert!(Difficulty::Easy.counts_as_correct());
    }

    #[test]
    fn begins_at_first_card() {
        let mut session = FlashcardSession::new(3);
        assert!(session.can_start());
        session.begin("s-1".to_string());
        assert_eq!(session.current_index(), Some(0));
        assert!(!session.showing_answer());
        assert_eq!(session.session_id(), Some("s-1"));
    }

    #[test]
    fn empty_deck_never_activates() {
        let mut session = FlashcardSession::new(0);
        assert!(!session.can_start());
        session.begin("s-1".to_string());
        assert_eq!(session.phase(), StudyPhase::NotStarted);
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut session = FlashcardSession::new(3);
        session.begin("s-1".to_string());

        session.retreat();
        assert_eq!(session.current_index(), Some(2));

        session.advance();
        assert_eq!(session.current_index(), Some(0));

        session.advance();
        session.advance();
        assert_eq!(session.current_index(), Some(2));
        session.advance();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn navigation_hides_the_answer() {
        let mut session = FlashcardSession::new(2);
        session.begin("s-1".to_string());

        session.toggle_answer();
        assert!(session.showing_answer());

        session.advance();
        assert!(!session.showing_answer());

        session.toggle_answer();
        session.retreat();
        assert!(!session.showing_answer());
    }

    #[test]
    fn finish_requires_an_active_session() {
        let mut session = FlashcardSession::new(2);
        assert_eq!(session.finish(), None);
        assert_eq!(session.phase(), StudyPhase::NotStarted);

        session.begin("s-1".to_string());
        assert_eq!(session.finish(), Some("s-1".to_string()));
        assert_eq!(session.phase(), StudyPhase::Ended);

        // Already ended, nothing left to terminate.
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn can_restart_after_ending() {
        let mut session = FlashcardSession::new(2);
        session.begin("s-1".to_string());
        session.finish();

        assert!(session.can_start());
        session.begin("s-2".to_string());
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.session_id(), Some("s-2"));
    }
}
