//! Tests for screen flow, the random opponent and callback handling.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tictactoe_arcade::{
    Board, GameMode, GameResult, GameState, ManualTimer, Mark, Position, RandomSource, RngSource,
    Screen, ScreenController, SequenceSource, Square, Status, Timer, TimerFired, TimerId,
    TimerTask, Timings,
};

type Controller = ScreenController<ManualTimer, SequenceSource>;

fn controller(values: &[usize]) -> Controller {
    ScreenController::new(
        ManualTimer::new(),
        SequenceSource::new(values.to_vec()),
        Timings::default(),
    )
}

fn fire(controller: &mut ScreenController<ManualTimer, impl RandomSource>, task: TimerTask) {
    let fired = controller
        .timer_mut()
        .fire(task)
        .unwrap_or_else(|| panic!("{:?} should be pending", task));
    controller.on_timer(fired);
}

fn board_screen(mode: GameMode, values: &[usize]) -> Controller {
    let mut c = controller(values);
    c.select_mode(mode);
    fire(&mut c, TimerTask::FinishTransition);
    c
}

#[test]
fn test_select_mode_shows_transition_then_board() {
    let mut c = controller(&[]);
    assert_eq!(*c.snapshot().screen(), Screen::Start);

    c.select_mode(GameMode::Computer);
    assert_eq!(*c.snapshot().screen(), Screen::Transition);
    assert_eq!(*c.snapshot().mode(), Some(GameMode::Computer));
    let pending = c.timer().pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fired.task, TimerTask::FinishTransition);
    assert_eq!(pending[0].delay, Duration::from_millis(3000));

    fire(&mut c, TimerTask::FinishTransition);
    assert_eq!(*c.snapshot().screen(), Screen::Board);
    // X moves first, so nothing is scheduled for the computer yet.
    assert!(c.timer().pending().is_empty());
}

#[test]
fn test_clicks_ignored_outside_board_screen() {
    let mut c = controller(&[]);
    c.click(4);
    assert_eq!(*c.snapshot().moves(), 0);

    c.select_mode(GameMode::Friend);
    c.click(4);
    assert_eq!(*c.snapshot().moves(), 0);
    assert_eq!(c.state().board().get(Position::Center), Square::Empty);
}

#[test]
fn test_second_mode_selection_is_ignored() {
    let mut c = controller(&[]);
    c.select_mode(GameMode::Friend);
    c.select_mode(GameMode::Computer);
    assert_eq!(c.state().mode(), Some(GameMode::Friend));
    assert_eq!(c.timer().pending().len(), 1);
}

#[test]
fn test_friend_mode_alternates_human_turns() {
    let mut c = board_screen(GameMode::Friend, &[]);
    for index in [0, 4, 1, 5, 2] {
        c.click(index);
    }
    assert_eq!(c.snapshot().status().to_string(), "Win: X");
    assert!(c.timer().pending().is_empty());

    let snapshot = c.snapshot();
    let lit: Vec<usize> = Position::ALL
        .iter()
        .filter(|pos| snapshot.is_highlighted(**pos))
        .map(|pos| pos.to_index())
        .collect();
    assert_eq!(lit, vec![0, 1, 2]);
}

#[test]
fn test_computer_replies_after_delay() {
    let mut c = board_screen(GameMode::Computer, &[0]);
    c.click(4);
    assert_eq!(*c.snapshot().status(), Status::Next(Mark::O));
    let pending = c.timer().pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fired.task, TimerTask::OpponentMove);
    assert_eq!(pending[0].delay, Duration::from_millis(500));

    fire(&mut c, TimerTask::OpponentMove);
    // First empty square is TopLeft.
    assert_eq!(c.state().board().get(Position::TopLeft), Square::Occupied(Mark::O));
    assert_eq!(c.state().turn(), Mark::X);
}

#[test]
fn test_human_cannot_move_for_computer() {
    let mut c = board_screen(GameMode::Computer, &[0]);
    c.click(4);
    c.click(8);
    assert_eq!(c.state().board().get(Position::BottomRight), Square::Empty);
    assert_eq!(c.state().turn(), Mark::O);
}

#[test]
fn test_computer_fills_last_empty_square() {
    // X X O / O O X / X O _ with O to move.
    let mut board = Board::new();
    for index in [0, 1, 5, 6] {
        board.set(Position::from_index(index).unwrap(), Square::Occupied(Mark::X));
    }
    for index in [2, 3, 4, 7] {
        board.set(Position::from_index(index).unwrap(), Square::Occupied(Mark::O));
    }
    let state = GameState::from_parts(board, Mark::O, Some(GameMode::Computer));
    let mut c = ScreenController::with_state(
        state,
        ManualTimer::new(),
        SequenceSource::new([5]),
        Timings::default(),
    );
    assert_eq!(c.timer().pending().len(), 1);

    fire(&mut c, TimerTask::OpponentMove);
    assert_eq!(c.state().board().get(Position::BottomRight), Square::Occupied(Mark::O));
    assert_eq!(c.state().turn(), Mark::X);
    assert_eq!(c.state().result(), GameResult::Draw);
}

#[test]
fn test_no_opponent_move_scheduled_after_human_wins() {
    let mut c = board_screen(GameMode::Computer, &[0]);
    // Opponent always takes the first empty square: X 4, O 0, X 2, O 1, X 6 wins.
    for index in [4, 2, 6] {
        c.click(index);
        if c.state().result() == GameResult::InProgress {
            fire(&mut c, TimerTask::OpponentMove);
        }
    }
    assert_eq!(c.state().result(), GameResult::Won(Mark::X));
    assert!(c.timer().pending().is_empty());
}

#[test]
fn test_restart_cancels_pending_opponent_move() {
    let mut c = board_screen(GameMode::Computer, &[0]);
    c.click(4);
    let pending = c.timer().pending()[0].fired;

    c.restart();
    assert_eq!(c.timer().cancelled(), &[pending.id]);
    assert!(c.timer().pending().is_empty());
    assert_eq!(c.state().mode(), Some(GameMode::Computer));

    // A late delivery of the cancelled callback does nothing.
    c.on_timer(pending);
    assert_eq!(*c.snapshot().moves(), 0);
    assert_eq!(c.state().turn(), Mark::X);
}

#[test]
fn test_new_game_then_select_computer() {
    let mut c = board_screen(GameMode::Friend, &[]);
    c.click(0);
    c.click(4);
    c.new_game();
    assert_eq!(*c.snapshot().screen(), Screen::Start);
    assert_eq!(*c.snapshot().moves(), 0);
    assert_eq!(c.state().board(), &Board::new());

    c.select_mode(GameMode::Computer);
    assert_eq!(*c.snapshot().screen(), Screen::Transition);
    fire(&mut c, TimerTask::FinishTransition);
    assert_eq!(*c.snapshot().screen(), Screen::Board);
}

#[test]
fn test_new_game_during_transition_cancels_it() {
    let mut c = controller(&[]);
    c.select_mode(GameMode::Computer);
    let pending = c.timer().pending()[0].fired;
    c.new_game();
    assert_eq!(c.timer().cancelled(), &[pending.id]);

    c.on_timer(pending);
    assert_eq!(*c.snapshot().screen(), Screen::Start);
}

#[test]
fn test_unknown_callback_is_ignored() {
    let mut c = board_screen(GameMode::Computer, &[0]);
    c.click(4);
    let bogus = TimerFired {
        id: c.timer().pending()[0].fired.id,
        task: TimerTask::FinishTransition,
    };
    c.on_timer(bogus);
    assert_eq!(*c.snapshot().screen(), Screen::Board);
    assert_eq!(c.state().turn(), Mark::O);
}

#[test]
fn test_seeded_computer_game_runs_to_completion() {
    let mut c = ScreenController::new(
        ManualTimer::new(),
        RngSource::from_seed(Some(7)),
        Timings::default(),
    );
    c.select_mode(GameMode::Computer);
    fire(&mut c, TimerTask::FinishTransition);

    while c.state().result() == GameResult::InProgress {
        if c.state().turn() == Mark::X {
            let target = c.state().empty_positions()[0];
            c.click(target.to_index());
        } else {
            fire(&mut c, TimerTask::OpponentMove);
        }
    }
    assert!(c.timer().pending().is_empty());
    assert!(matches!(*c.snapshot().status(), Status::Win(_) | Status::Draw));
}

/// Shares a [`ManualTimer`] so it can be inspected after the controller
/// is dropped.
#[derive(Debug, Clone, Default)]
struct SharedTimer(Rc<RefCell<ManualTimer>>);

impl Timer for SharedTimer {
    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerId {
        self.0.borrow_mut().schedule(task, delay)
    }

    fn cancel(&mut self, id: TimerId) {
        self.0.borrow_mut().cancel(id);
    }
}

#[test]
fn test_drop_cancels_pending_callbacks() {
    let timer = SharedTimer::default();
    let mut c = ScreenController::new(timer.clone(), SequenceSource::default(), Timings::default());
    c.select_mode(GameMode::Friend);
    assert_eq!(timer.0.borrow().pending().len(), 1);

    drop(c);
    assert!(timer.0.borrow().pending().is_empty());
    assert_eq!(timer.0.borrow().cancelled().len(), 1);
}
