//! Session-level control: owns the state and routes surface events.

use crate::eval::BoardEvaluator;
use crate::render::{self, BoardView};
use crate::sync::{ExchangeOutcome, PACING, TurnSynchronizer};
use crate::types::{GameState, Player};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Status-line prompt shown after a reset, offering the opponent the opening
/// move.
pub const OPENING_PROMPT: &str = "Make a move, or press 's' if you would like me to start.";

/// Top-level controller for one play session.
///
/// Owns the game state, the turn synchronizer, the status-line text, and the
/// restart affordance. Surfaces deliver activations in, read frames out
/// through [`SessionController::view`], and feed exchange completions back
/// through [`SessionController::finish_exchange`].
pub struct SessionController {
    state: GameState,
    sync: TurnSynchronizer,
    message: String,
    restart_enabled: bool,
}

impl SessionController {
    /// Creates a controller over the given engine, already reset to the
    /// initial session state. The returned receiver carries exchange
    /// completions for the session loop to drain.
    pub fn new(
        engine: Arc<dyn BoardEvaluator>,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeOutcome>) {
        Self::with_pacing(engine, PACING)
    }

    /// As [`SessionController::new`], with an explicit pacing delay.
    pub fn with_pacing(
        engine: Arc<dyn BoardEvaluator>,
        pacing: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeOutcome>) {
        let (sync, outcome_rx) = TurnSynchronizer::with_pacing(engine, pacing);
        let mut controller = Self {
            state: GameState::new(),
            sync,
            message: String::new(),
            restart_enabled: false,
        };
        controller.reset();
        (controller, outcome_rx)
    }

    /// Read access to the committed game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current status-line text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True while an exchange with the engine is outstanding.
    pub fn is_waiting(&self) -> bool {
        self.sync.is_waiting()
    }

    /// Reinitializes the session: fresh state, opening prompt restored, the
    /// restart control disarmed until the session changes again, and any
    /// outstanding exchange abandoned. An abandoned exchange's reply, should
    /// it still arrive, is discarded as stale.
    #[instrument(skip_all)]
    pub fn reset(&mut self) {
        info!("Resetting session");
        self.sync.abandon();
        self.state = GameState::new();
        self.message = OPENING_PROMPT.to_string();
        self.restart_enabled = false;
    }

    /// A restart activation from the display surface.
    pub fn handle_restart_request(&mut self) {
        self.reset();
    }

    /// A cell activation: the human attempting a move at `position`.
    ///
    /// On success the mark is committed, the restart control armed, and the
    /// evaluation exchange started. On refusal the specific reason becomes
    /// the status message and the board is untouched.
    #[instrument(skip(self))]
    pub fn handle_cell_activation(&mut self, position: usize) {
        match self.state.apply_human_move(position) {
            Ok(()) => {
                debug!(position, "Human move committed");
                self.message.clear();
                self.restart_enabled = true;
                if let Err(err) = self.sync.start(&mut self.state) {
                    warn!(error = %err, "Exchange did not start");
                    self.message = format!("Error! {err}");
                }
            }
            Err(err) => {
                debug!(position, error = %err, "Human move refused");
                self.message = err.to_string();
            }
        }
    }

    /// A status-area activation: the request that the opponent open the game.
    ///
    /// Honored only while the board is untouched, nothing is in flight, and
    /// the game is in progress; at any other time the activation is ignored.
    #[instrument(skip_all)]
    pub fn handle_status_activation(&mut self) {
        if self.sync.is_waiting()
            || self.state.status().is_terminal()
            || self.state.turn() != Player::Human
            || !self.state.board().is_untouched()
        {
            debug!("Ignoring opponent-opens request");
            return;
        }
        info!("Opponent opens the game");
        if let Err(err) = self.sync.start(&mut self.state) {
            warn!(error = %err, "Exchange did not start");
            self.message = format!("Error! {err}");
        }
    }

    /// Routes one exchange completion back into the session.
    ///
    /// Stale completions change nothing, not even the status line.
    #[instrument(skip_all)]
    pub fn finish_exchange(&mut self, outcome: ExchangeOutcome) {
        let result = self.sync.complete(&mut self.state, outcome);
        if let Some(message) = result.message() {
            self.message = message;
            self.restart_enabled = true;
        }
    }

    /// Projects the session onto a frame for the display surface.
    pub fn view(&self) -> BoardView {
        render::project(&self.state, &self.message, self.restart_enabled)
    }
}
