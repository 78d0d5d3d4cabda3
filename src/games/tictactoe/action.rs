//! Rejection reasons for placements.

use super::Position;

/// Why a placement was not applied.
///
/// The game treats every rejection as a no-op; this type only exists so
/// callers that care can tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is outside the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
