//! Tic-tac-toe against a friend or a random computer opponent.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw detection over eight fixed lines
//! - **GameState**: board, turn and mode; result, status and screen are
//!   derived on every read
//! - **ScreenController**: applies clicks and timer callbacks, drives the
//!   "Get Ready!" transition and the random opponent
//! - **TUI**: ratatui front end rendering controller snapshots
//!
//! # Example
//!
//! ```
//! use tictactoe_arcade::{
//!     GameMode, ManualTimer, Screen, ScreenController, SequenceSource, TimerTask, Timings,
//! };
//!
//! let mut controller =
//!     ScreenController::new(ManualTimer::new(), SequenceSource::new([0]), Timings::default());
//! controller.select_mode(GameMode::Friend);
//! assert_eq!(*controller.snapshot().screen(), Screen::Transition);
//!
//! let fired = controller.timer_mut().fire(TimerTask::FinishTransition).unwrap();
//! controller.on_timer(fired);
//! controller.click(4);
//! assert_eq!(controller.snapshot().status().to_string(), "Next: O");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod controller;
mod games;
mod opponent;
mod random;
mod snapshot;
mod timer;
mod tui;

// Crate-level exports - CLI and configuration
pub use cli::Cli;
pub use config::{ArcadeConfig, ConfigError};

// Crate-level exports - Game types
pub use games::tictactoe::{
    Board, GameMode, GameResult, GameState, Mark, MoveError, Position, Screen, Square, Status,
    WinningLine, rules,
};

// Crate-level exports - Controller and collaborators
pub use controller::{ScreenController, Timings};
pub use opponent::pick_move;
pub use random::{RandomSource, RngSource, SequenceSource};
pub use snapshot::Snapshot;
pub use timer::{ManualTimer, Scheduled, Timer, TimerFired, TimerId, TimerTask, TokioTimer};

// Crate-level exports - Terminal UI
pub use tui::{Command, command_for, move_cursor, run_tui};
