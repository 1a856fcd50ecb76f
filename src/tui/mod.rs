//! Terminal UI for Remote Tic-Tac-Toe

mod ui;

use crate::cli::Cli;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use remote_tictactoe::{ExchangeOutcome, HttpEvaluator, SessionController};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Runs the client until the user quits.
pub async fn run(cli: Cli) -> Result<()> {
    // Log to a file so nothing bleeds onto the alternate screen.
    let log_file = std::fs::File::create("remote_tictactoe.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %cli.server_url, pace_ms = cli.pace_ms, "Starting Remote Tic-Tac-Toe");

    let engine = Arc::new(HttpEvaluator::new(cli.server_url));
    let (mut session, mut outcomes) =
        SessionController::with_pacing(engine, Duration::from_millis(cli.pace_ms));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_session(&mut terminal, &mut session, &mut outcomes).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {err:?}");
    }
    res
}

/// Session loop: draw a frame, drain exchange completions, poll the keyboard.
async fn run_session<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut SessionController,
    outcomes: &mut mpsc::UnboundedReceiver<ExchangeOutcome>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &session.view()))?;

        while let Ok(outcome) = outcomes.try_recv() {
            session.finish_exchange(outcome);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => {
                        info!("User quit");
                        return Ok(());
                    }
                    KeyCode::Char('r') => {
                        // The restart control only acts while armed.
                        if session.view().restart_enabled {
                            session.handle_restart_request();
                        }
                    }
                    KeyCode::Char('s') => {
                        session.handle_status_activation();
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if let Some(digit) = c.to_digit(10) {
                            let pos = digit as usize;
                            if pos >= 1 && pos <= 9 {
                                debug!(position = pos - 1, "Cell activated");
                                session.handle_cell_activation(pos - 1);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
