//! Turn synchronization with the evaluation service.
//!
//! At most one evaluation exchange is outstanding at any time. The ordering
//! is load-bearing: the turn flag is handed to the opponent before the pacing
//! delay begins, and handed back only in the completion step, which runs on
//! success and on failure alike. A failed exchange therefore never strands
//! the game waiting for an opponent who will not answer.

use crate::eval::{BoardEvaluator, EvalError, EvalReply, EvalVerdict};
use crate::types::{GameState, Player};
use derive_more::{Display, Error};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Delay before each evaluation request. Keeps the engine's answer from
/// appearing instantaneous.
pub const PACING: Duration = Duration::from_millis(500);

/// Completion report sent from the exchange task back to the session loop.
#[derive(Debug)]
pub struct ExchangeOutcome {
    generation: u64,
    result: Result<EvalReply, EvalError>,
}

/// What [`TurnSynchronizer::complete`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeResult {
    /// The reply was applied to the game state.
    Applied(EvalVerdict),
    /// The exchange failed; the state is untouched and the turn released.
    Failed(EvalError),
    /// The outcome belonged to an abandoned exchange and was discarded.
    Stale,
}

impl ExchangeResult {
    /// Status-line text for this outcome. `None` for discarded stale replies,
    /// which must leave no visible trace.
    pub fn message(&self) -> Option<String> {
        match self {
            ExchangeResult::Applied(verdict) => Some(
                match verdict {
                    EvalVerdict::Continue => "Your turn.",
                    EvalVerdict::OpponentWin => "I won!",
                    EvalVerdict::HumanWin => "You won!",
                    EvalVerdict::Draw => "We tied.",
                }
                .to_string(),
            ),
            ExchangeResult::Failed(err) => Some(format!("Error! {err}")),
            ExchangeResult::Stale => None,
        }
    }
}

/// Why an exchange could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SyncError {
    /// An exchange is already outstanding.
    #[display("an evaluation exchange is already in flight")]
    ExchangeInFlight,
    /// The game has ended; reset before asking for another move.
    #[display("the game is over")]
    GameOver,
}

/// Token for the single outstanding exchange.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    task: JoinHandle<()>,
}

/// Drives the one-at-a-time exchange cycle with the evaluation engine.
///
/// Each cycle: hand the turn to the opponent, wait out the pacing delay, send
/// the board, and report the outcome through the completion channel. The
/// session loop feeds outcomes back through [`TurnSynchronizer::complete`].
/// Outcomes are tagged with a generation so a reply that arrives after its
/// exchange was abandoned is recognized and discarded.
pub struct TurnSynchronizer {
    engine: Arc<dyn BoardEvaluator>,
    outcome_tx: mpsc::UnboundedSender<ExchangeOutcome>,
    pacing: Duration,
    in_flight: Option<InFlight>,
    generation: u64,
}

impl TurnSynchronizer {
    /// Creates a synchronizer around the given engine, returning the receiver
    /// the session loop drains for completion outcomes.
    pub fn new(engine: Arc<dyn BoardEvaluator>) -> (Self, mpsc::UnboundedReceiver<ExchangeOutcome>) {
        Self::with_pacing(engine, PACING)
    }

    /// As [`TurnSynchronizer::new`], with an explicit pacing delay.
    pub fn with_pacing(
        engine: Arc<dyn BoardEvaluator>,
        pacing: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        (
            Self {
                engine,
                outcome_tx,
                pacing,
                in_flight: None,
                generation: 0,
            },
            outcome_rx,
        )
    }

    /// True while an exchange is outstanding.
    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts one exchange cycle for the current board.
    ///
    /// Serves both the post-move exchange and the opponent-opens-the-game
    /// request. Refuses when an exchange is already outstanding or the game
    /// has ended; on refusal the state is untouched. On success the turn flag
    /// already belongs to the opponent when this returns.
    #[instrument(skip_all)]
    pub fn start(&mut self, state: &mut GameState) -> Result<(), SyncError> {
        if self.in_flight.is_some() {
            warn!("Refusing to start a second exchange");
            return Err(SyncError::ExchangeInFlight);
        }
        if state.status().is_terminal() {
            warn!(status = ?state.status(), "Refusing to start an exchange after game end");
            return Err(SyncError::GameOver);
        }

        // The flag flips before the task exists; human moves are blocked for
        // the whole cycle, pacing delay included.
        state.set_turn(Player::Opponent);

        self.generation += 1;
        let generation = self.generation;
        let board = state.board().clone();
        let engine = Arc::clone(&self.engine);
        let outcome_tx = self.outcome_tx.clone();
        let pacing = self.pacing;

        info!(generation, board = %board.encode(), "Dispatching evaluation exchange");
        let task = tokio::spawn(async move {
            tokio::time::sleep(pacing).await;
            let result = engine.evaluate(&board).await;
            // The receiver only disappears with the session loop itself.
            let _ = outcome_tx.send(ExchangeOutcome { generation, result });
        });

        self.in_flight = Some(InFlight { generation, task });
        Ok(())
    }

    /// Applies one completion outcome to the game state.
    ///
    /// A successful reply commits board, status, and winning line in one
    /// step; a failure leaves the state untouched. Both paths end by handing
    /// the turn back to the human. Outcomes whose generation does not match
    /// the outstanding exchange are discarded without touching anything.
    #[instrument(skip_all, fields(generation = outcome.generation))]
    pub fn complete(&mut self, state: &mut GameState, outcome: ExchangeOutcome) -> ExchangeResult {
        match &self.in_flight {
            Some(in_flight) if in_flight.generation == outcome.generation => {}
            _ => {
                debug!("Discarding stale exchange outcome");
                return ExchangeResult::Stale;
            }
        }
        self.in_flight = None;

        let result = match outcome.result {
            Ok(reply) => {
                let line = (reply.verdict.is_win() && !reply.positions.is_empty())
                    .then_some(reply.positions);
                info!(verdict = ?reply.verdict, board = %reply.board.encode(), "Applying evaluation reply");
                state.apply_opponent_result(reply.board, reply.verdict.game_status(), line);
                ExchangeResult::Applied(reply.verdict)
            }
            Err(err) => {
                warn!(error = %err, "Evaluation exchange failed");
                ExchangeResult::Failed(err)
            }
        };

        // Unconditional release: the human may act again even after a failure.
        state.set_turn(Player::Human);
        result
    }

    /// Abandons the outstanding exchange, if any. A reply already queued in
    /// the completion channel will be discarded as stale by `complete`.
    #[instrument(skip_all)]
    pub fn abandon(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            info!(generation = in_flight.generation, "Abandoning in-flight exchange");
            in_flight.task.abort();
        }
    }
}
