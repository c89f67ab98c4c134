//! Keyboard-to-command mapping for the round loop. Raw mode is held only
//! while a key is pending, so ordinary printing stays line-buffered.

use anyhow::Result;
use game_core::Direction;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Blocks until a key that maps to a command arrives; other keys are
/// swallowed.
pub fn read_command() -> Result<Command> {
    let _guard = RawModeGuard::enable()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = translate(key) {
                return Ok(command);
            }
        }
    }
}

fn translate(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => Some(Command::Move(Direction::Up)),
            's' => Some(Command::Move(Direction::Down)),
            'a' => Some(Command::Move(Direction::Left)),
            'd' => Some(Command::Move(Direction::Right)),
            'q' => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_map_to_the_same_directions() {
        assert_eq!(translate(press(KeyCode::Char('w'))), Some(Command::Move(Direction::Up)));
        assert_eq!(translate(press(KeyCode::Up)), Some(Command::Move(Direction::Up)));
        assert_eq!(translate(press(KeyCode::Char('a'))), Some(Command::Move(Direction::Left)));
        assert_eq!(translate(press(KeyCode::Left)), Some(Command::Move(Direction::Left)));
        assert_eq!(translate(press(KeyCode::Char('S'))), Some(Command::Move(Direction::Down)));
        assert_eq!(translate(press(KeyCode::Right)), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(translate(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn unmapped_keys_are_swallowed() {
        assert_eq!(translate(press(KeyCode::Char('x'))), None);
        assert_eq!(translate(press(KeyCode::Enter)), None);
        assert_eq!(translate(press(KeyCode::Esc)), None);
    }
}
