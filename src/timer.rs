//! Timer collaborator for delayed game events.
//!
//! The controller never sleeps. It asks a [`Timer`] to deliver a
//! [`TimerFired`] message after a delay and feeds that message back into
//! [`ScreenController::on_timer`](crate::ScreenController::on_timer) when it
//! arrives.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("timer#{}", _0)]
pub struct TimerId(u64);

/// What a callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerTask {
    /// Leave the transition screen for the board.
    FinishTransition,
    /// Let the computer place its mark.
    OpponentMove,
}

/// Message delivered when a callback's delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFired {
    /// The callback that fired.
    pub id: TimerId,
    /// What it was scheduled for.
    pub task: TimerTask,
}

/// Schedules and cancels one-shot callbacks.
pub trait Timer {
    /// Requests a [`TimerFired`] for `task` after `delay`.
    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerId;

    /// Cancels a pending callback. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Timer backed by tokio tasks.
///
/// Each callback is a spawned task that sleeps and then sends on the
/// channel returned by [`TokioTimer::new`]. Must be used inside a tokio
/// runtime.
#[derive(Debug)]
pub struct TokioTimer {
    tx: mpsc::UnboundedSender<TimerFired>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimer {
    /// Creates a timer and the receiver its callbacks are delivered on.
    #[instrument]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (timer, rx)
    }
}

impl Timer for TokioTimer {
    #[instrument(skip(self))]
    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerId {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(TimerFired { id, task }).is_err() {
                debug!(%id, "Timer receiver dropped before callback fired");
            }
        });
        self.tasks.insert(id, handle);
        debug!(%id, ?task, "Callback scheduled");
        id
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!(%id, "Callback cancelled");
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

/// A callback request recorded by [`ManualTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// The message to deliver when fired.
    pub fired: TimerFired,
    /// Requested delay.
    pub delay: Duration,
}

/// Timer that only records requests; the host decides when they fire.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    pending: Vec<Scheduled>,
    cancelled: Vec<TimerId>,
}

impl ManualTimer {
    /// Creates a timer with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled, oldest first.
    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    /// Ids cancelled so far.
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Removes and returns the oldest pending request for `task`.
    #[instrument(skip(self))]
    pub fn fire(&mut self, task: TimerTask) -> Option<TimerFired> {
        let idx = self.pending.iter().position(|s| s.fired.task == task)?;
        Some(self.pending.remove(idx).fired)
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            fired: TimerFired { id, task },
            delay,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|s| s.fired.id != id);
        if self.pending.len() < before {
            self.cancelled.push(id);
        }
    }
}
