use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    /// Scroll to the section of nav link N (0-based)
    JumpToSection(usize),
    NextNavFocus,
    PrevNavFocus,
    ClearNavFocus,
    /// Follow the focused nav link
    Activate,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Action::ScrollDown
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
            Action::ScrollUp
        }

        // Half-page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::PageDown, _) => Action::HalfPageDown,
        (KeyCode::PageUp, _) => Action::HalfPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) | (KeyCode::Char('G'), KeyModifiers::NONE) => {
            Action::JumpToBottom
        }
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Section jumps
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            let index = (c as usize) - ('1' as usize);
            if index < app.nav.len() {
                Action::JumpToSection(index)
            } else {
                Action::None
            }
        }

        // Keyboard hover over the nav bar
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextNavFocus,
        (KeyCode::BackTab, _) => Action::PrevNavFocus,
        (KeyCode::Esc, _) => Action::ClearNavFocus,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Activate,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use kinetic_core::AppConfig;

    use crate::theme::Theme;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app), Action::JumpToTop);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT), &app),
            Action::JumpToBottom
        );
    }

    #[test]
    fn test_section_digits() {
        let app = app();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1'), KeyModifiers::NONE), &app),
            Action::JumpToSection(0)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('5'), KeyModifiers::NONE), &app),
            Action::JumpToSection(4)
        );
        // only five nav links
        assert_eq!(
            handle_key_event(key(KeyCode::Char('6'), KeyModifiers::NONE), &app),
            Action::None
        );
    }

    #[test]
    fn test_half_page_and_focus_keys() {
        let app = app();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::HalfPageDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('u'), KeyModifiers::CONTROL), &app),
            Action::HalfPageUp
        );
        assert_eq!(handle_key_event(key(KeyCode::Tab, KeyModifiers::NONE), &app), Action::NextNavFocus);
        assert_eq!(handle_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT), &app), Action::PrevNavFocus);
        assert_eq!(handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &app), Action::ClearNavFocus);
    }
}
