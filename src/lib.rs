//! Remote tic-tac-toe - client-side session control for a remote engine
//!
//! This library owns the authoritative game state for a tic-tac-toe session
//! played against an external move-evaluation service, and serializes the
//! one-at-a-time asynchronous exchange with that service.
//!
//! # Architecture
//!
//! - **Types**: the board, turn flag, and game aggregate
//! - **Eval**: the validated seam to the evaluation service
//! - **Sync**: the single-flight exchange protocol with pacing
//! - **Controller**: session-level event routing and reset
//! - **Render**: pure projection of state into drawable frames
//!
//! # Example
//!
//! ```no_run
//! use remote_tictactoe::{HttpEvaluator, SessionController};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let engine = Arc::new(HttpEvaluator::new("http://127.0.0.1:8000"));
//! let (mut session, mut outcomes) = SessionController::new(engine);
//!
//! // The human takes the center; the exchange completes asynchronously.
//! session.handle_cell_activation(4);
//! if let Some(outcome) = outcomes.recv().await {
//!     session.finish_exchange(outcome);
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod eval;
mod http;
mod render;
mod sync;
mod types;

// Crate-level exports - Session control
pub use controller::{OPENING_PROMPT, SessionController};

// Crate-level exports - Evaluation seam
pub use eval::{BoardEvaluator, EvalError, EvalReply, EvalVerdict, RawEvalReply};

// Crate-level exports - HTTP evaluator
pub use http::HttpEvaluator;

// Crate-level exports - Turn synchronization
pub use sync::{ExchangeOutcome, ExchangeResult, PACING, SyncError, TurnSynchronizer};

// Crate-level exports - Rendering projection
pub use render::{BoardView, CellView, project};

// Crate-level exports - Core types
pub use types::{Board, BoardCodecError, Cell, GameState, GameStatus, MoveError, Player};
