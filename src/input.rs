/// Key bindings: turns a raw key press into a session `Command`.
///
/// The same key means different things per state (Space starts from the
/// menu, jumps while playing, restarts after a crash), so the mapping is
/// keyed on the current status.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::{Command, GameStatus};

pub fn command_for(status: GameStatus, key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match status {
        GameStatus::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Exit),
            _ => None,
        },
        GameStatus::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(Command::Jump)
            }
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        GameStatus::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(Command::Restart)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Exit),
            _ => None,
        },
        GameStatus::ConfirmExitFromMenu | GameStatus::ConfirmExitFromGameOver => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Command::ConfirmYes),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::ConfirmNo),
            _ => None,
        },
        GameStatus::Exited => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_depends_on_state() {
        let space = press(KeyCode::Char(' '));
        assert_eq!(command_for(GameStatus::Menu, &space), Some(Command::Start));
        assert_eq!(command_for(GameStatus::Playing, &space), Some(Command::Jump));
        assert_eq!(command_for(GameStatus::GameOver, &space), Some(Command::Restart));
        assert_eq!(command_for(GameStatus::ConfirmExitFromMenu, &space), None);
    }

    #[test]
    fn escape_asks_before_leaving_menus() {
        let esc = press(KeyCode::Esc);
        assert_eq!(command_for(GameStatus::Menu, &esc), Some(Command::Exit));
        assert_eq!(command_for(GameStatus::GameOver, &esc), Some(Command::Exit));
        assert_eq!(command_for(GameStatus::ConfirmExitFromGameOver, &esc), Some(Command::ConfirmNo));
        assert_eq!(command_for(GameStatus::Playing, &esc), Some(Command::Quit));
    }

    #[test]
    fn confirm_keys() {
        assert_eq!(
            command_for(GameStatus::ConfirmExitFromMenu, &press(KeyCode::Char('y'))),
            Some(Command::ConfirmYes)
        );
        assert_eq!(
            command_for(GameStatus::ConfirmExitFromMenu, &press(KeyCode::Char('N'))),
            Some(Command::ConfirmNo)
        );
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for status in [
            GameStatus::Menu,
            GameStatus::Playing,
            GameStatus::GameOver,
            GameStatus::ConfirmExitFromMenu,
        ] {
            assert_eq!(command_for(status, &ctrl_c), Some(Command::Quit));
        }
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = press(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for(GameStatus::Playing, &release), None);
    }
}
