//! The seam to the external move-evaluation service.
//!
//! The service is an opaque async function: it receives the board after the
//! human's move and returns the board after its own move together with a
//! verdict. Everything crossing this seam is validated before any of it can
//! touch game state.

use crate::types::{Board, BoardCodecError, GameStatus, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Verdict carried by an evaluation reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalVerdict {
    /// The game goes on.
    Continue,
    /// The engine completed a line.
    OpponentWin,
    /// The human completed a line.
    HumanWin,
    /// Full board, no line.
    Draw,
}

impl EvalVerdict {
    /// Parses the wire status string.
    pub fn from_wire(status: &str) -> Option<Self> {
        match status {
            "continue" => Some(Self::Continue),
            "iwin" => Some(Self::OpponentWin),
            "uwin" => Some(Self::HumanWin),
            "draw" => Some(Self::Draw),
            _ => None,
        }
    }

    /// Maps the verdict onto the game status it commits.
    pub fn game_status(self) -> GameStatus {
        match self {
            Self::Continue => GameStatus::InProgress,
            Self::OpponentWin => GameStatus::Won(Player::Opponent),
            Self::HumanWin => GameStatus::Won(Player::Human),
            Self::Draw => GameStatus::Draw,
        }
    }

    /// True when the verdict carries a winning line to highlight.
    pub fn is_win(self) -> bool {
        matches!(self, Self::OpponentWin | Self::HumanWin)
    }
}

/// Failure talking to, or decoding from, the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EvalError {
    /// Transport-level failure: connection, HTTP status, or body read.
    #[display("evaluation request failed: {reason}")]
    Transport {
        /// Description of the underlying failure.
        reason: String,
    },
    /// The reply's board string did not decode.
    #[display("evaluation reply carried a bad board: {_0}")]
    BadBoard(BoardCodecError),
    /// The reply's status string is not one the protocol knows.
    #[display("bad status = {status}")]
    UnknownStatus {
        /// The string the service sent.
        status: String,
    },
    /// A winning-line index was off the board.
    #[display("winning position {position} is off the board")]
    PositionOutOfRange {
        /// The offending index.
        position: usize,
    },
}

impl From<BoardCodecError> for EvalError {
    fn from(err: BoardCodecError) -> Self {
        Self::BadBoard(err)
    }
}

impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            reason: err.to_string(),
        }
    }
}

/// Evaluation response as it appears on the wire, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvalReply {
    /// Nine-character board encoding.
    pub board: String,
    /// Status string: `continue`, `iwin`, `uwin`, or `draw`.
    pub status: String,
    /// Winning-line indices. Absent or empty except for win statuses.
    #[serde(default)]
    pub positions: Vec<usize>,
}

/// A validated evaluation response.
///
/// Every field has been checked: the board decodes, the verdict is known, and
/// the line indices are on the board. Validation happens before any game
/// state changes, so a malformed reply can never leave a half-applied update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalReply {
    /// Board after the engine's move.
    pub board: Board,
    /// Outcome of the evaluation.
    pub verdict: EvalVerdict,
    /// Indices of the completed line. Meaningful only for win verdicts.
    pub positions: Vec<usize>,
}

impl TryFrom<RawEvalReply> for EvalReply {
    type Error = EvalError;

    fn try_from(raw: RawEvalReply) -> Result<Self, EvalError> {
        let board = Board::decode(&raw.board)?;
        let Some(verdict) = EvalVerdict::from_wire(&raw.status) else {
            return Err(EvalError::UnknownStatus { status: raw.status });
        };
        if let Some(&position) = raw.positions.iter().find(|&&position| position >= 9) {
            return Err(EvalError::PositionOutOfRange { position });
        }
        Ok(Self {
            board,
            verdict,
            positions: raw.positions,
        })
    }
}

/// A move-evaluation engine, viewed from the client.
#[async_trait::async_trait]
pub trait BoardEvaluator: Send + Sync {
    /// Evaluates the given board and returns the engine's move and verdict.
    async fn evaluate(&self, board: &Board) -> Result<EvalReply, EvalError>;
}
