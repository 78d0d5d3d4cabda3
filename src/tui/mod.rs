//! Terminal host: renders snapshots and feeds keys and timer callbacks to
//! the controller.

mod input;
mod ui;

pub use input::{Command, command_for, move_cursor};

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::config::ArcadeConfig;
use crate::controller::ScreenController;
use crate::games::tictactoe::Position;
use crate::random::{RandomSource, RngSource};
use crate::timer::{Timer, TimerFired, TokioTimer};

/// How long to wait for a key before checking timers again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Runs the game until the user quits.
#[instrument(skip(config))]
pub async fn run_tui(config: ArcadeConfig) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (timer, mut timer_rx) = TokioTimer::new();
    let rng = RngSource::from_seed(*config.seed());
    let mut controller = ScreenController::new(timer, rng, config.timings());

    let res = run_game(&mut terminal, &mut controller, &mut timer_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Terminal UI closed");
    res
}

/// Event loop: draw, deliver due callbacks, handle one key.
async fn run_game<T: Timer, R: RandomSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut ScreenController<T, R>,
    timer_rx: &mut mpsc::UnboundedReceiver<TimerFired>,
) -> Result<()> {
    let mut cursor = Position::Center;

    loop {
        while let Ok(fired) = timer_rx.try_recv() {
            controller.on_timer(fired);
        }

        let snapshot = controller.snapshot();
        terminal.draw(|f| ui::draw(f, &snapshot, cursor))?;

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            let Some(command) = command_for(*snapshot.screen(), key.code, cursor) else {
                continue;
            };
            debug!(?command, "Key command");
            match command {
                Command::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                Command::SelectMode(mode) => controller.select_mode(mode),
                Command::Place(pos) => {
                    cursor = pos;
                    controller.click(pos.to_index());
                }
                Command::MoveCursor(pos) => cursor = pos,
                Command::Restart => controller.restart(),
                Command::NewGame => {
                    cursor = Position::Center;
                    controller.new_game();
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
