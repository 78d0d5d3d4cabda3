//! Key bindings and cursor movement.

use crossterm::event::KeyCode;

use crate::games::tictactoe::{GameMode, Position, Screen};

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick a mode on the start screen.
    SelectMode(GameMode),
    /// Place a mark at a square.
    Place(Position),
    /// Move the board cursor.
    MoveCursor(Position),
    /// Restart the round.
    Restart,
    /// Back to mode selection.
    NewGame,
    /// Leave the application.
    Quit,
}

/// Maps a key to a command for the given screen.
pub fn command_for(screen: Screen, key: KeyCode, cursor: Position) -> Option<Command> {
    if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Some(Command::Quit);
    }
    match screen {
        Screen::Start => match key {
            KeyCode::Char('1') | KeyCode::Char('f') | KeyCode::Char('F') => {
                Some(Command::SelectMode(GameMode::Friend))
            }
            KeyCode::Char('2') | KeyCode::Char('c') | KeyCode::Char('C') => {
                Some(Command::SelectMode(GameMode::Computer))
            }
            _ => None,
        },
        Screen::Transition => None,
        Screen::Board => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewGame),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Place(cursor)),
            KeyCode::Char(c) => Position::from_key(c).map(Command::Place),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                Some(Command::MoveCursor(move_cursor(cursor, key)))
            }
            _ => None,
        },
    }
}

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::BottomCenter, KeyCode::Right), Position::BottomRight);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::MiddleRight, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_digits_depend_on_screen() {
        let cursor = Position::Center;
        assert_eq!(
            command_for(Screen::Start, KeyCode::Char('2'), cursor),
            Some(Command::SelectMode(GameMode::Computer))
        );
        assert_eq!(
            command_for(Screen::Board, KeyCode::Char('2'), cursor),
            Some(Command::Place(Position::TopCenter))
        );
        assert_eq!(command_for(Screen::Transition, KeyCode::Char('2'), cursor), None);
    }

    #[test]
    fn test_quit_works_everywhere() {
        for screen in [Screen::Start, Screen::Transition, Screen::Board] {
            assert_eq!(command_for(screen, KeyCode::Char('q'), Position::Center), Some(Command::Quit));
            assert_eq!(command_for(screen, KeyCode::Esc, Position::Center), Some(Command::Quit));
        }
    }

    #[test]
    fn test_enter_places_at_cursor() {
        assert_eq!(
            command_for(Screen::Board, KeyCode::Enter, Position::BottomLeft),
            Some(Command::Place(Position::BottomLeft))
        );
        assert_eq!(command_for(Screen::Start, KeyCode::Enter, Position::BottomLeft), None);
    }
}
