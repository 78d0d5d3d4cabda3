//! Tic-tac-toe rules, board and game state.

mod action;
mod mode;
mod position;
pub mod rules;
mod state;
mod types;

pub use action::MoveError;
pub use mode::GameMode;
pub use position::Position;
pub use rules::WinningLine;
pub use state::{GameResult, GameState, Screen, Status};
pub use types::{Board, Mark, Square};
