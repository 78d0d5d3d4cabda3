//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use super::super::{Board, Square};
use super::win::check_winner;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner. A line completed by the last move is a
/// win, not a draw.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::super::super::{Mark, Position};
    use super::*;

    fn fill(board: &mut Board, xs: &[Position], os: &[Position]) {
        for &pos in xs {
            board.set(pos, Square::Occupied(Mark::X));
        }
        for &pos in os {
            board.set(pos, Square::Occupied(Mark::O));
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let mut board = Board::new();
        fill(
            &mut board,
            &[
                Position::TopLeft,
                Position::TopRight,
                Position::Center,
                Position::MiddleRight,
                Position::BottomCenter,
            ],
            &[
                Position::TopCenter,
                Position::MiddleLeft,
                Position::BottomLeft,
                Position::BottomRight,
            ],
        );
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_line_is_not_draw() {
        // X X X / O O X / X O O
        let mut board = Board::new();
        fill(
            &mut board,
            &[
                Position::TopLeft,
                Position::TopCenter,
                Position::TopRight,
                Position::MiddleRight,
                Position::BottomLeft,
            ],
            &[
                Position::MiddleLeft,
                Position::Center,
                Position::BottomCenter,
                Position::BottomRight,
            ],
        );
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
