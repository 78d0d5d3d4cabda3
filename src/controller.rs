//! Screen controller: applies user and timer events to a game session.
//!
//! The controller is synchronous. Delays go through the [`Timer`]
//! collaborator, randomness through the [`RandomSource`] collaborator, so a
//! test can drive a whole session without sleeping.

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{GameMode, GameResult, GameState, Screen};
use crate::opponent;
use crate::random::RandomSource;
use crate::snapshot::Snapshot;
use crate::timer::{Timer, TimerFired, TimerId, TimerTask};

/// Delays used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Timings {
    /// How long the transition screen stays up.
    transition: Duration,
    /// How long the computer waits before moving.
    opponent_delay: Duration,
}

impl Timings {
    /// Default transition delay in milliseconds.
    pub const DEFAULT_TRANSITION_MS: u64 = 3000;
    /// Default opponent delay in milliseconds.
    pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 500;

    /// Creates timings from explicit durations.
    pub fn new(transition: Duration, opponent_delay: Duration) -> Self {
        Self {
            transition,
            opponent_delay,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_TRANSITION_MS),
            Duration::from_millis(Self::DEFAULT_OPPONENT_DELAY_MS),
        )
    }
}

/// Owns one game session and its pending callbacks.
///
/// Dropping the controller cancels every pending callback.
#[derive(Debug)]
pub struct ScreenController<T: Timer, R: RandomSource> {
    state: GameState,
    timer: T,
    rng: R,
    timings: Timings,
    pending_transition: Option<TimerId>,
    pending_opponent: Option<TimerId>,
}

impl<T: Timer, R: RandomSource> ScreenController<T, R> {
    /// Creates a controller on the start screen.
    pub fn new(timer: T, rng: R, timings: Timings) -> Self {
        Self::with_state(GameState::new(), timer, rng, timings)
    }

    /// Creates a controller resuming `state`.
    ///
    /// Any callback the state is waiting for (transition or computer move)
    /// is scheduled immediately.
    #[instrument(skip_all, fields(screen = %state.screen()))]
    pub fn with_state(state: GameState, timer: T, rng: R, timings: Timings) -> Self {
        let mut controller = Self {
            state,
            timer,
            rng,
            timings,
            pending_transition: None,
            pending_opponent: None,
        };
        if controller.state.screen() == Screen::Transition {
            controller.schedule_transition();
        }
        controller.schedule_opponent_if_due();
        controller
    }

    /// The game session.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The timer collaborator.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable access to the timer, for hosts that fire callbacks by hand.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Delays in use.
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Read-only view for the renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Chooses a mode from the start screen and starts the transition.
    #[instrument(skip(self))]
    pub fn select_mode(&mut self, mode: GameMode) {
        if self.state.screen() != Screen::Start {
            debug!(screen = %self.state.screen(), "Mode selection outside start screen ignored");
            return;
        }
        self.state.select_mode(mode);
        self.schedule_transition();
    }

    /// A click on the square at `index`.
    ///
    /// Ignored off the board screen and, against the computer, while the
    /// computer is to move.
    #[instrument(skip(self))]
    pub fn click(&mut self, index: usize) {
        if self.state.screen() != Screen::Board {
            debug!(screen = %self.state.screen(), "Click outside board screen ignored");
            return;
        }
        if self.is_computer_turn() {
            debug!("Click during computer turn ignored");
            return;
        }
        if self.state.place_mark(index) {
            self.schedule_opponent_if_due();
        }
    }

    /// "Restart Game": clears the board, keeps the mode.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        if self.state.screen() != Screen::Board {
            debug!(screen = %self.state.screen(), "Restart outside board screen ignored");
            return;
        }
        self.cancel_opponent();
        self.state.restart();
        self.schedule_opponent_if_due();
    }

    /// "New Game": clears the board and returns to mode selection.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.cancel_opponent();
        if let Some(id) = self.pending_transition.take() {
            self.timer.cancel(id);
        }
        self.state.new_game();
    }

    /// Delivers a fired callback. Stale or cancelled callbacks are ignored.
    #[instrument(skip(self))]
    pub fn on_timer(&mut self, fired: TimerFired) {
        match fired.task {
            TimerTask::FinishTransition => {
                if self.pending_transition != Some(fired.id) {
                    debug!(id = %fired.id, "Stale transition callback ignored");
                    return;
                }
                self.pending_transition = None;
                self.state.finish_transition();
                self.schedule_opponent_if_due();
            }
            TimerTask::OpponentMove => {
                if self.pending_opponent != Some(fired.id) {
                    debug!(id = %fired.id, "Stale opponent callback ignored");
                    return;
                }
                self.pending_opponent = None;
                self.play_opponent();
            }
        }
    }

    /// The computer's move, re-checked at fire time.
    fn play_opponent(&mut self) {
        if !self.opponent_due() {
            debug!("Opponent move no longer due");
            return;
        }
        match opponent::pick_move(self.state.board(), &mut self.rng) {
            Some(pos) => {
                if !self.state.place_mark(pos.to_index()) {
                    warn!(position = %pos, "Opponent placement rejected");
                }
            }
            None => debug!("No empty square left for opponent"),
        }
    }

    fn is_computer_turn(&self) -> bool {
        self.state
            .mode()
            .and_then(GameMode::computer_mark)
            .is_some_and(|mark| mark == self.state.turn())
    }

    fn opponent_due(&self) -> bool {
        self.state.screen() == Screen::Board
            && self.is_computer_turn()
            && self.state.result() == GameResult::InProgress
    }

    fn schedule_transition(&mut self) {
        if let Some(id) = self.pending_transition.take() {
            self.timer.cancel(id);
        }
        info!(delay_ms = self.timings.transition.as_millis(), "Showing transition screen");
        let id = self
            .timer
            .schedule(TimerTask::FinishTransition, self.timings.transition);
        self.pending_transition = Some(id);
    }

    fn schedule_opponent_if_due(&mut self) {
        if self.pending_opponent.is_some() || !self.opponent_due() {
            return;
        }
        let id = self
            .timer
            .schedule(TimerTask::OpponentMove, self.timings.opponent_delay);
        debug!(%id, "Opponent move scheduled");
        self.pending_opponent = Some(id);
    }

    fn cancel_opponent(&mut self) {
        if let Some(id) = self.pending_opponent.take() {
            self.timer.cancel(id);
        }
    }
}

impl<T: Timer, R: RandomSource> Drop for ScreenController<T, R> {
    fn drop(&mut self) {
        for id in [self.pending_transition.take(), self.pending_opponent.take()]
            .into_iter()
            .flatten()
        {
            self.timer.cancel(id);
        }
    }
}
