//! Board containers.
//!
//! Cells are append-only: the only way to change one is
//! [`SuperBoard::place`], which refuses to overwrite a marked cell.

use serde::{Deserialize, Serialize};

use crate::engine::{game_outcome, sub_board_outcome};
use crate::{Cell, Mark, Move, MoveRejection, Outcome, BOARD_SIZE};

/// One inner 3×3 grid, cells in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubBoard {
    cells: [Cell; BOARD_SIZE],
}

impl SubBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sub-board from explicit cells. Mostly useful in tests.
    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Returns the cell at `index`, or `None` when out of range.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_full(&self) -> bool {
        crate::engine::is_full(&self.cells)
    }

    /// Derived from the cells every time; never cached here.
    pub fn outcome(&self) -> Outcome {
        sub_board_outcome(self)
    }
}

/// The 3×3 grid of sub-boards plus the outcome of each one.
///
/// `outcomes[i]` is kept in step with `boards[i]` by [`place`](Self::place):
/// it is recomputed for the touched sub-board after every write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuperBoard {
    boards: [SubBoard; BOARD_SIZE],
    outcomes: [Outcome; BOARD_SIZE],
}

impl SuperBoard {
    /// An empty board: every cell empty, every outcome undecided.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a super-board from sub-boards, deriving every outcome.
    pub fn from_boards(boards: [SubBoard; BOARD_SIZE]) -> Self {
        let outcomes = boards.map(|board| board.outcome());
        Self { boards, outcomes }
    }

    pub fn boards(&self) -> &[SubBoard; BOARD_SIZE] {
        &self.boards
    }

    /// Returns sub-board `index`.
    ///
    /// # Panics
    /// If `index >= 9`. Indices coming from a [`Move`] are always in range.
    pub fn sub_board(&self, index: usize) -> &SubBoard {
        &self.boards[index]
    }

    /// The "big board winners" sequence.
    pub fn outcomes(&self) -> &[Outcome; BOARD_SIZE] {
        &self.outcomes
    }

    pub fn outcome(&self, index: usize) -> Outcome {
        self.outcomes[index]
    }

    /// The game result, computed over [`outcomes`](Self::outcomes).
    pub fn game_outcome(&self) -> Outcome {
        game_outcome(&self.outcomes)
    }

    /// Writes `mark` at `mv` and recomputes that sub-board's outcome.
    ///
    /// Returns the sub-board's outcome after the write. Does not check
    /// turn order or the active board; that is [`validate_move`]'s job.
    ///
    /// [`validate_move`]: crate::validate_move
    pub fn place(&mut self, mv: Move, mark: Mark) -> Result<Outcome, MoveRejection> {
        let index = mv.sub_board();
        if self.outcomes[index].is_decided() {
            return Err(MoveRejection::SubBoardDecided);
        }
        let cell = &mut self.boards[index].cells[mv.cell()];
        if !cell.is_empty() {
            return Err(MoveRejection::CellOccupied);
        }
        *cell = Cell::Marked(mark);

        let outcome = self.boards[index].outcome();
        self.outcomes[index] = outcome;
        Ok(outcome)
    }
}
