//! Command-line interface for remote_tictactoe.

use clap::Parser;

/// Remote Tic-Tac-Toe - terminal client for a remote evaluation engine
#[derive(Parser, Debug)]
#[command(name = "remote_tictactoe")]
#[command(about = "Play tic-tac-toe against a remote evaluation engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the evaluation service
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub server_url: String,

    /// Pacing delay before each evaluation request, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub pace_ms: u64,
}
