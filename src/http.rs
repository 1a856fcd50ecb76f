//! HTTP client for the move-evaluation service.

use crate::eval::{BoardEvaluator, EvalError, EvalReply, RawEvalReply};
use crate::types::Board;
use tracing::{debug, instrument};

/// Evaluator that speaks the service's `GET /evalBoard` protocol.
///
/// The board travels as the `board` query parameter in its nine-character
/// encoding; the reply comes back as JSON and is validated before it is
/// returned.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    /// Base URL of the evaluation service, without a trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpEvaluator {
    /// Creates an evaluator for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl BoardEvaluator for HttpEvaluator {
    #[instrument(skip(self, board), fields(base_url = %self.base_url))]
    async fn evaluate(&self, board: &Board) -> Result<EvalReply, EvalError> {
        let encoded = board.encode();
        debug!(board = %encoded, "Requesting evaluation");

        let url = format!("{}/evalBoard", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("board", encoded.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let raw: RawEvalReply = response.json().await?;
        debug!(board = %raw.board, status = %raw.status, "Evaluation received");

        raw.try_into()
    }
}
