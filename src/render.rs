//! Pure projection of game state onto a display surface.
//!
//! The surface draws what the projection says and nothing else. Occupancy,
//! turn ownership, and game status live only in [`GameState`]; they are never
//! read back out of anything a surface has drawn.

use crate::types::{Cell, GameState, Player};

/// One cell as the display surface should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// The mark occupying the cell, if any.
    pub mark: Option<Player>,
    /// True when the cell belongs to the winning line.
    pub highlighted: bool,
}

/// Everything a display surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// The nine cells, indexed 0-8 in row-major order.
    pub cells: [CellView; 9],
    /// Text for the status line under the board.
    pub status_line: String,
    /// Whether the restart control accepts activation.
    pub restart_enabled: bool,
}

/// Projects committed state into a frame for the display surface.
pub fn project(state: &GameState, status_line: &str, restart_enabled: bool) -> BoardView {
    let mut cells = [CellView {
        mark: None,
        highlighted: false,
    }; 9];

    for (index, cell) in state.board().cells().iter().enumerate() {
        cells[index].mark = match cell {
            Cell::Empty => None,
            Cell::Taken(player) => Some(*player),
        };
    }

    if let Some(line) = state.winning_line() {
        for &index in line {
            if let Some(cell) = cells.get_mut(index) {
                cell.highlighted = true;
            }
        }
    }

    BoardView {
        cells,
        status_line: status_line.to_string(),
        restart_enabled,
    }
}
