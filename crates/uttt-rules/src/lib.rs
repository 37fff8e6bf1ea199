//! Rules engine for Ultimate Tic-Tac-Toe.
//!
//! Everything in this crate is a pure function over board values: no I/O,
//! no async, no shared state. The room layer owns the mutable match state
//! and calls into here to decide what a move means.
//!
//! # Layers
//!
//! ```text
//! SuperBoard ── 9 × SubBoard ── 9 × Cell
//!     │
//!     └── 9 × Outcome ("big board winners")
//! ```
//!
//! The same [`check_line`] routine decides both layers: it runs over the
//! cells of a sub-board and over the outcomes of the super-board.

mod board;
mod engine;
mod error;
mod types;

pub use board::{SubBoard, SuperBoard};
pub use engine::{
    check_line, game_outcome, is_full, next_active_board, sub_board_outcome,
    validate_move, LINES,
};
pub use error::{MoveRejection, RulesError};
pub use types::{ActiveBoard, Cell, LineMark, Mark, Move, Outcome, TurnState, BOARD_SIZE};
