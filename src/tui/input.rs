use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::AppState;

/// Maps key events to UI actions for the current state
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Process a key event
    pub fn handle_key(&self, key: KeyEvent, state: &AppState) -> InputAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputAction::Quit;
        }

        match state {
            AppState::Insert => match key.code {
                // Enter alone sends; with a modifier held it only breaks the line
                KeyCode::Enter if key.modifiers.is_empty() => InputAction::Submit,
                KeyCode::Enter => InputAction::Newline,
                KeyCode::Char(c) if !is_chord(&key) => InputAction::Insert(c),
                KeyCode::Backspace => InputAction::Delete,
                KeyCode::Tab => InputAction::SwitchTo(AppState::Questions),
                KeyCode::Esc => InputAction::SwitchTo(AppState::Normal),
                KeyCode::PageUp => InputAction::ScrollUp,
                KeyCode::PageDown => InputAction::ScrollDown,
                _ => InputAction::None,
            },
            AppState::Questions => match key.code {
                KeyCode::Up | KeyCode::Char('k') => InputAction::SelectPrev,
                KeyCode::Down | KeyCode::Char('j') => InputAction::SelectNext,
                KeyCode::Enter => InputAction::SendSelected,
                KeyCode::Tab | KeyCode::Esc => InputAction::SwitchTo(AppState::Insert),
                _ => InputAction::None,
            },
            AppState::Normal => match key.code {
                KeyCode::Char('q') => InputAction::Quit,
                KeyCode::Char('i') => InputAction::SwitchTo(AppState::Insert),
                KeyCode::Char(':') => InputAction::SwitchTo(AppState::Command),
                KeyCode::Tab => InputAction::SwitchTo(AppState::Questions),
                KeyCode::Up | KeyCode::PageUp => InputAction::ScrollUp,
                KeyCode::Down | KeyCode::PageDown => InputAction::ScrollDown,
                _ => InputAction::None,
            },
            AppState::Command => match key.code {
                KeyCode::Enter => InputAction::RunCommand,
                KeyCode::Char(c) if !is_chord(&key) => InputAction::Insert(c),
                KeyCode::Backspace => InputAction::Delete,
                KeyCode::Esc => InputAction::SwitchTo(AppState::Normal),
                _ => InputAction::None,
            },
        }
    }
}

/// Ctrl/Alt combinations are shortcuts, never text
fn is_chord(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Newline,
    Insert(char),
    Delete,
    SelectPrev,
    SelectNext,
    SendSelected,
    RunCommand,
    ScrollUp,
    ScrollDown,
    SwitchTo(AppState),
    Quit,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_submits_only_without_modifiers() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &AppState::Insert),
            InputAction::Submit
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter, KeyModifiers::SHIFT), &AppState::Insert),
            InputAction::Newline
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter, KeyModifiers::ALT), &AppState::Insert),
            InputAction::Newline
        );
    }

    #[test]
    fn test_ctrl_and_alt_chords_insert_nothing() {
        let handler = InputHandler::new();
        for state in [AppState::Insert, AppState::Command] {
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('a'), KeyModifiers::CONTROL), &state),
                InputAction::None
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('x'), KeyModifiers::ALT), &state),
                InputAction::None
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('X'), KeyModifiers::SHIFT), &state),
                InputAction::Insert('X')
            );
        }
    }

    #[test]
    fn test_question_navigation() {
        let handler = InputHandler::new();
        let state = AppState::Questions;
        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyModifiers::NONE), &state),
            InputAction::SelectNext
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &state),
            InputAction::SendSelected
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Tab, KeyModifiers::NONE), &state),
            InputAction::SwitchTo(AppState::Insert)
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let handler = InputHandler::new();
        for state in [AppState::Insert, AppState::Questions, AppState::Normal, AppState::Command] {
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &state),
                InputAction::Quit
            );
        }
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('c'), KeyModifiers::NONE), &AppState::Insert),
            InputAction::Insert('c')
        );
    }
}
