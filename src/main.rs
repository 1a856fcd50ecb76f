//! Remote Tic-Tac-Toe - terminal client
//!
//! Plays a local human against a remote move-evaluation engine.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tui::run(cli).await
}
