use crossterm::event::KeyCode;
use quadris_engine::{Command, SessionState};

use crate::view::widgets::KeyBinding;

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Engine(Command),
    Quit,
}

pub(crate) fn action_for_key(code: KeyCode) -> Option<Action> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('x' | 'X') => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p' | 'P') => Command::TogglePause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Engine(command))
}

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑", "X"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Q", "Esc"], "Quit")];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["Q", "Esc"], "Quit")];

/// Key bindings that do something in `state`.
pub(crate) fn key_bindings(state: SessionState) -> &'static [KeyBinding<'static>] {
    match state {
        SessionState::Playing => PLAYING_BINDINGS,
        SessionState::Paused => PAUSED_BINDINGS,
        SessionState::GameOver => GAME_OVER_BINDINGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            action_for_key(KeyCode::Left),
            Some(Action::Engine(Command::MoveLeft))
        );
        assert_eq!(
            action_for_key(KeyCode::Right),
            Some(Action::Engine(Command::MoveRight))
        );
        assert_eq!(
            action_for_key(KeyCode::Down),
            Some(Action::Engine(Command::SoftDrop))
        );
        assert_eq!(
            action_for_key(KeyCode::Char(' ')),
            Some(Action::Engine(Command::HardDrop))
        );
    }

    #[test]
    fn test_rotate_and_pause_keys_ignore_case() {
        for code in [KeyCode::Up, KeyCode::Char('x'), KeyCode::Char('X')] {
            assert_eq!(action_for_key(code), Some(Action::Engine(Command::Rotate)));
        }
        for code in [KeyCode::Char('p'), KeyCode::Char('P')] {
            assert_eq!(
                action_for_key(code),
                Some(Action::Engine(Command::TogglePause))
            );
        }
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            assert_eq!(action_for_key(code), Some(Action::Quit));
        }
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(KeyCode::Char('z')), None);
        assert_eq!(action_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_every_state_can_quit() {
        for state in [
            SessionState::Playing,
            SessionState::Paused,
            SessionState::GameOver,
        ] {
            assert!(
                key_bindings(state)
                    .iter()
                    .any(|(_, description)| *description == "Quit")
            );
        }
    }
}
