use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{StudyTab, View};
use crate::study::Difficulty;

#[derive(Debug, Clone)]
pub enum AppAction {
    Quit,
    ShowHelp,
    HideHelp,
    GoUpload,
    GoAnalytics,
    Refresh,
    Back,
    // Dashboard
    MoveUp,
    MoveDown,
    OpenSelected,
    // Upload form
    FormChar(char),
    FormBackspace,
    FormToggleFocus,
    FormSubmit,
    FormCancel,
    // Document view
    NextTab,
    StartStudy,
    NextCard,
    PrevCard,
    ToggleAnswer,
    Rate(Difficulty),
    EndStudy,
    QuizUp,
    QuizDown,
    SelectOption(usize),
    SubmitQuiz,
}

pub fn handle_key_event(
    key: KeyEvent,
    view: View,
    tab: StudyTab,
    study_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Some(AppAction::Quit);
    }

    // The upload form consumes character input wholesale.
    if view == View::Upload {
        return match key.code {
            KeyCode::Esc => Some(AppAction::FormCancel),
            KeyCode::Tab | KeyCode::BackTab => Some(AppAction::FormToggleFocus),
            KeyCode::Enter => Some(AppAction::FormSubmit),
            KeyCode::Backspace => Some(AppAction::FormBackspace),
            KeyCode::Char(c) => Some(AppAction::FormChar(c)),
            _ => None,
        };
    }

    // Keys shared by all browsing views.
    match key.code {
        KeyCode::Char('q') => return Some(AppAction::Quit),
        KeyCode::Char('?') => return Some(AppAction::ShowHelp),
        _ => {}
    }

    match view {
        View::Dashboard => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(AppAction::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppAction::MoveUp),
            KeyCode::Enter => Some(AppAction::OpenSelected),
            KeyCode::Char('u') => Some(AppAction::GoUpload),
            KeyCode::Char('a') => Some(AppAction::GoAnalytics),
            KeyCode::Char('r') => Some(AppAction::Refresh),
            _ => None,
        },

        View::Analytics => match key.code {
            KeyCode::Esc => Some(AppAction::Back),
            KeyCode::Char('r') => Some(AppAction::Refresh),
            _ => None,
        },

        View::Document => {
            if let Some(action) = match key.code {
                KeyCode::Esc => Some(AppAction::Back),
                KeyCode::Tab => Some(AppAction::NextTab),
                // Refreshing mid-session would tear the session down.
                KeyCode::Char('r') if !study_active => Some(AppAction::Refresh),
                _ => None,
            } {
                return Some(action);
            }

            match tab {
                StudyTab::Summary => None,

                StudyTab::Flashcards => {
                    if study_active {
                        match key.code {
                            KeyCode::Char(' ') | KeyCode::Enter => Some(AppAction::ToggleAnswer),
                            KeyCode::Char('n') | KeyCode::Right => Some(AppAction::NextCard),
                            KeyCode::Char('p') | KeyCode::Left => Some(AppAction::PrevCard),
                            KeyCode::Char('e') => Some(AppAction::EndStudy),
                            KeyCode::Char(c) => Difficulty::from_key(c).map(AppAction::Rate),
                            _ => None,
                        }
                    } else {
                        match key.code {
                            KeyCode::Enter | KeyCode::Char(' ') => Some(AppAction::StartStudy),
                            _ => None,
                        }
                    }
                }

                StudyTab::Quiz => match key.code {
                    KeyCode::Char('j') | KeyCode::Down => Some(AppAction::QuizDown),
                    KeyCode::Char('k') | KeyCode::Up => Some(AppAction::QuizUp),
                    KeyCode::Char(c @ '1'..='9') => {
                        Some(AppAction::SelectOption(c as usize - '1' as usize))
                    }
                    KeyCode::Enter => Some(AppAction::SubmitQuiz),
                    _ => None,
                },
            }
        }

        View::Upload => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn upload_view_captures_characters() {
        let action = handle_key_event(
            key(KeyCode::Char('q')),
            View::Upload,
            StudyTab::Summary,
            false,
            false,
        );
        assert!(matches!(action, Some(AppAction::FormChar('q'))));
    }

    #[test]
    fn rating_keys_only_apply_during_an_active_session() {
        let active = handle_key_event(
            key(KeyCode::Char('1')),
            View::Document,
            StudyTab::Flashcards,
            true,
            false,
        );
        assert!(matches!(active, Some(AppAction::Rate(Difficulty::Hard))));

        let inactive = handle_key_event(
            key(KeyCode::Char('1')),
            View::Document,
            StudyTab::Flashcards,
            false,
            false,
        );
        assert!(inactive.is_none());
    }

    #[test]
    fn digit_keys_select_quiz_options() {
        let action = handle_key_event(
            key(KeyCode::Char('3')),
            View::Document,
            StudyTab::Quiz,
            false,
            false,
        );
        assert!(matches!(action, Some(AppAction::SelectOption(2))));
    }

    #[test]
    fn any_key_closes_help() {
        let action = handle_key_event(
            key(KeyCode::Char('x')),
            View::Dashboard,
            StudyTab::Summary,
            false,
            true,
        );
        assert!(matches!(action, Some(AppAction::HideHelp)));
    }
}
