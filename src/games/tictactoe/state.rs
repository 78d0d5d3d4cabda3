//! Game state: board, turn, mode and the transition flag.
//!
//! Result, status and screen are derived on every read and never stored,
//! so they cannot drift from the board.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::action::MoveError;
use super::rules::{self, WinningLine};
use super::{Board, GameMode, Mark, Position, Square};

/// Outcome of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// No line is complete and empty squares remain.
    InProgress,
    /// A mark completed a line.
    Won(Mark),
    /// The board is full and no line is complete.
    Draw,
}

/// Status line shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// A mark won.
    #[display("Win: {}", _0)]
    Win(Mark),
    /// Nobody won and the board is full.
    #[display("Draw")]
    Draw,
    /// The mark that moves next.
    #[display("Next: {}", _0)]
    Next(Mark),
}

/// The top-level view currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Screen {
    /// Mode selection.
    Start,
    /// "Get Ready!" interlude after a mode is chosen.
    Transition,
    /// The board.
    Board,
}

/// State of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Mark,
    mode: Option<GameMode>,
    transition_active: bool,
    history: Vec<Position>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a session on the start screen with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            mode: None,
            transition_active: false,
            history: Vec::new(),
        }
    }

    /// Creates a session at an arbitrary position, past the transition.
    ///
    /// The history is empty since the order of the moves is unknown.
    #[instrument(skip(board))]
    pub fn from_parts(board: Board, turn: Mark, mode: Option<GameMode>) -> Self {
        Self {
            board,
            turn,
            mode,
            transition_active: false,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that plays next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the selected mode, `None` while on the start screen.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Positions played this round, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Places the current turn's mark at `index`.
    ///
    /// Out-of-range indices, occupied squares and finished games are
    /// ignored. Returns whether a mark was placed.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place_mark(&mut self, index: usize) -> bool {
        let result = Position::from_index(index)
            .ok_or(MoveError::OutOfBounds(index))
            .and_then(|pos| self.try_place(pos));
        match result {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Ignoring placement");
                false
            }
        }
    }

    /// Places the current turn's mark at `pos`, naming the reason on
    /// rejection. A rejected placement leaves the state untouched.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn try_place(&mut self, pos: Position) -> Result<Mark, MoveError> {
        if rules::check_winner(&self.board).is_some() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let mark = self.turn;
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(pos);
        self.turn = mark.opponent();
        debug!(%mark, position = %pos, "Mark placed");

        match self.result() {
            GameResult::Won(winner) => info!(%winner, "Game won"),
            GameResult::Draw => info!("Game drawn"),
            GameResult::InProgress => {}
        }
        Ok(mark)
    }

    /// Clears the board for another round in the same mode.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        debug!(mode = ?self.mode, "Restarting round");
        self.board.clear();
        self.history.clear();
        self.turn = Mark::X;
    }

    /// Clears the board and returns to mode selection.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!("Returning to mode selection");
        self.restart();
        self.mode = None;
        self.transition_active = false;
    }

    /// Sets the mode and starts the transition screen.
    #[instrument(skip(self))]
    pub fn select_mode(&mut self, mode: GameMode) {
        info!(?mode, "Mode selected");
        self.mode = Some(mode);
        self.transition_active = true;
    }

    /// Ends the transition screen. Does nothing on the start screen.
    #[instrument(skip(self))]
    pub fn finish_transition(&mut self) {
        if self.transition_active {
            debug!("Transition finished");
        }
        self.transition_active = false;
    }

    /// The screen implied by mode and transition flag.
    pub fn screen(&self) -> Screen {
        match (self.mode, self.transition_active) {
            (None, _) => Screen::Start,
            (Some(_), true) => Screen::Transition,
            (Some(_), false) => Screen::Board,
        }
    }

    /// Outcome of the round so far. A completed line beats a full board.
    pub fn result(&self) -> GameResult {
        if let Some(winner) = rules::check_winner(&self.board) {
            GameResult::Won(winner)
        } else if rules::is_draw(&self.board) {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Status line for the current position.
    pub fn status(&self) -> Status {
        match self.result() {
            GameResult::Won(mark) => Status::Win(mark),
            GameResult::Draw => Status::Draw,
            GameResult::InProgress => Status::Next(self.turn),
        }
    }

    /// The first completed line, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        rules::winning_line(&self.board)
    }

    /// Empty squares in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }
}
