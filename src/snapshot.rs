//! Read-only view handed to the renderer.

use derive_getters::Getters;
use serde::Serialize;

use crate::games::tictactoe::{Board, GameMode, GameState, Position, Screen, Status};

/// Everything the renderer needs after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Snapshot {
    /// Screen to present.
    screen: Screen,
    /// Selected mode, `None` on the start screen.
    mode: Option<GameMode>,
    /// Board contents.
    board: Board,
    /// Status line.
    status: Status,
    /// Per-square flag: part of the winning line.
    highlighted: [bool; 9],
    /// Number of marks placed this round.
    moves: usize,
}

impl Snapshot {
    /// Captures the current state.
    pub fn of(state: &GameState) -> Self {
        let line = state.winning_line();
        let highlighted =
            Position::ALL.map(|pos| line.is_some_and(|line| line.contains(pos)));
        Self {
            screen: state.screen(),
            mode: state.mode(),
            board: state.board().clone(),
            status: state.status(),
            highlighted,
            moves: state.history().len(),
        }
    }

    /// Whether the square at `pos` is part of the winning line.
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.highlighted[pos.to_index()]
    }
}
