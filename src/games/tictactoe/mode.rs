//! Game mode chosen on the start screen.

use serde::{Deserialize, Serialize};

use super::Mark;

/// Who the second player is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum GameMode {
    /// Two humans share the board.
    Friend,
    /// The human plays X against a random opponent playing O.
    Computer,
}

impl GameMode {
    /// The mark played by the computer in this mode, if any.
    pub fn computer_mark(self) -> Option<Mark> {
        match self {
            GameMode::Friend => None,
            GameMode::Computer => Some(Mark::O),
        }
    }

    /// Label shown on the start screen.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Friend => "Play with Friend",
            GameMode::Computer => "Play with Computer",
        }
    }
}
