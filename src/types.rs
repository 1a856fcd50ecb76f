//! Core domain types: the board, the turn flag, and the game aggregate.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Wire marker for the human player.
const HUMAN_MARKER: char = 'X';
/// Wire marker for the engine.
const OPPONENT_MARKER: char = 'O';
/// Wire marker for a vacant cell.
const EMPTY_MARKER: char = '-';

/// A side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The local human (marker `X`).
    Human,
    /// The remote evaluation engine (marker `O`).
    Opponent,
}

impl Player {
    /// Returns the single-character wire marker for this side.
    pub fn marker(self) -> char {
        match self {
            Player::Human => HUMAN_MARKER,
            Player::Opponent => OPPONENT_MARKER,
        }
    }
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    Empty,
    /// Marked by a side.
    Taken(Player),
}

/// Why a board encoding failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardCodecError {
    /// The encoding was not exactly nine characters.
    #[display("board encoding must be 9 characters, got {len}")]
    WrongLength {
        /// Observed character count.
        len: usize,
    },
    /// A character was not one of `-`, `X`, `O`.
    #[display("unrecognized marker {found:?} at position {position}")]
    BadMarker {
        /// Index of the offending character.
        position: usize,
        /// The character found there.
        found: char,
    },
}

/// The 3x3 board: nine cells in row-major order, indexed 0-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Overwrites the cell at the given position. Callers validate bounds.
    fn set(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }

    /// Checks whether a position is on the board and unmarked.
    pub fn is_vacant(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// True when no cell carries a mark.
    pub fn is_untouched(&self) -> bool {
        self.cells.iter().all(|cell| *cell == Cell::Empty)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Encodes the board as the nine-character wire string.
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => EMPTY_MARKER,
                Cell::Taken(player) => player.marker(),
            })
            .collect()
    }

    /// Decodes a nine-character wire string into a board.
    pub fn decode(encoded: &str) -> Result<Self, BoardCodecError> {
        let mut cells = [Cell::Empty; 9];
        let mut len = 0;
        for (position, found) in encoded.chars().enumerate() {
            if position >= 9 {
                return Err(BoardCodecError::WrongLength {
                    len: encoded.chars().count(),
                });
            }
            cells[position] = match found {
                EMPTY_MARKER => Cell::Empty,
                HUMAN_MARKER => Cell::Taken(Player::Human),
                OPPONENT_MARKER => Cell::Taken(Player::Opponent),
                _ => return Err(BoardCodecError::BadMarker { position, found }),
            };
            len += 1;
        }
        if len != 9 {
            return Err(BoardCodecError::WrongLength { len });
        }
        Ok(Self { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended with a full board and no winner.
    Draw,
}

impl GameStatus {
    /// True for `Won` and `Draw`. A terminal status blocks all moves until reset.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Why a human move was refused. The display text doubles as the status-line
/// message shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// An evaluation exchange is still outstanding.
    #[display("Sorry, it's not your turn yet")]
    NotYourTurn,
    /// The game has already ended.
    #[display("Sorry, game over!")]
    GameOver,
    /// The position is not on the board.
    #[display("Sorry, that's not a place on the board")]
    OutOfBounds,
    /// The cell already carries a mark.
    #[display("Sorry, you can't move there...")]
    Occupied,
}

/// Complete client-side game state.
///
/// This aggregate is the single authority on occupancy, turn ownership, and
/// game status. Display surfaces only ever read projections of it; nothing is
/// ever inferred back from rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Which side may act next.
    turn: Player,
    /// Game status.
    status: GameStatus,
    /// Cells of the completed line, once a side has won.
    winning_line: Option<Vec<usize>>,
}

impl GameState {
    /// Creates a fresh game: empty board, human to move, in progress.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::Human,
            status: GameStatus::InProgress,
            winning_line: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns which side may act next.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winning line, once one exists.
    pub fn winning_line(&self) -> Option<&[usize]> {
        self.winning_line.as_deref()
    }

    /// Validates and applies a human move at the given position.
    ///
    /// All preconditions must hold or the board is left untouched: it is the
    /// human's turn, the game is in progress, the position is on the board,
    /// and the cell is vacant. Refusal reasons are checked in that order.
    ///
    /// Applying a move neither hands the turn over nor decides the outcome.
    /// Win and draw detection belongs to the evaluation engine; the status
    /// only changes when a reply is applied.
    pub fn apply_human_move(&mut self, position: usize) -> Result<(), MoveError> {
        if self.turn != Player::Human {
            return Err(MoveError::NotYourTurn);
        }
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if position >= 9 {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_vacant(position) {
            return Err(MoveError::Occupied);
        }
        self.board.set(position, Cell::Taken(Player::Human));
        Ok(())
    }

    /// Commits the engine's evaluation outcome in a single step.
    ///
    /// The replacement board, the status, and the winning line land together,
    /// so no observer can see a half-applied outcome.
    pub fn apply_opponent_result(
        &mut self,
        board: Board,
        status: GameStatus,
        winning_line: Option<Vec<usize>>,
    ) {
        self.board = board;
        self.status = status;
        self.winning_line = winning_line;
    }

    /// Hands the turn flag to the given side.
    pub(crate) fn set_turn(&mut self, turn: Player) {
        self.turn = turn;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
