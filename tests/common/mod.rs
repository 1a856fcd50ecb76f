//! Shared test support: a scripted in-memory evaluation engine.

use async_trait::async_trait;
use remote_tictactoe::{Board, BoardEvaluator, EvalError, EvalReply, EvalVerdict};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Engine that replays a scripted sequence of replies and records every board
/// it was asked to evaluate.
pub struct ScriptedEngine {
    replies: Mutex<VecDeque<Result<EvalReply, EvalError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    pub fn new(replies: Vec<Result<EvalReply, EvalError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Board encodings received, in request order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoardEvaluator for ScriptedEngine {
    async fn evaluate(&self, board: &Board) -> Result<EvalReply, EvalError> {
        self.seen.lock().unwrap().push(board.encode());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(EvalError::Transport {
                reason: "script exhausted".into(),
            })
        })
    }
}

/// Builds a successful scripted reply.
pub fn reply(
    board: &str,
    verdict: EvalVerdict,
    positions: &[usize],
) -> Result<EvalReply, EvalError> {
    Ok(EvalReply {
        board: Board::decode(board).expect("scripted board should decode"),
        verdict,
        positions: positions.to_vec(),
    })
}
