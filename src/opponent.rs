//! The computer opponent: a uniformly random empty square.

use tracing::{debug, instrument, warn};

use crate::games::tictactoe::{Board, Position};
use crate::random::RandomSource;

/// Picks one of the empty squares uniformly at random.
///
/// Returns `None` on a full board, or when the random source breaks its
/// contract by returning an index outside the empty squares.
#[instrument(skip(board, rng))]
pub fn pick_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let empty = Position::valid_moves(board);
    if empty.is_empty() {
        return None;
    }
    let pick = rng.pick_index(empty.len());
    let Some(&pos) = empty.get(pick) else {
        warn!(pick, choices = empty.len(), "Random source returned an out-of-range index");
        return None;
    };
    debug!(position = %pos, choices = empty.len(), "Opponent chose position");
    Some(pos)
}
