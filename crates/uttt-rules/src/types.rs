//! Value types shared by every layer: marks, cells, outcomes, moves.
//!
//! The serde representations here ARE the wire format of the `GAME_STATE`
//! snapshot, so each type maps onto the JSON the browser client expects:
//!
//! | Rust                       | JSON          |
//! |----------------------------|---------------|
//! | `Cell::Empty`              | `null`        |
//! | `Cell::Marked(Mark::X)`    | `"X"`         |
//! | `Outcome::Undecided`       | `null`        |
//! | `Outcome::Draw`            | `"DRAW"`      |
//! | `ActiveBoard::Any`         | `null`        |
//! | `ActiveBoard::Board(3)`    | `3`           |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RulesError;

/// Number of sub-boards in the super-board, and of cells in a sub-board.
pub const BOARD_SIZE: usize = 9;

// ---------------------------------------------------------------------------
// Mark
// ---------------------------------------------------------------------------

/// A player's symbol. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

// ---------------------------------------------------------------------------
// LineMark
// ---------------------------------------------------------------------------

/// Anything that can take part in a three-in-a-row.
///
/// Implemented for [`Cell`] (inner boards) and [`Outcome`] (the big
/// board). Returning `None` means "this slot can never complete a line":
/// an empty cell, an undecided sub-board, or a drawn sub-board.
pub trait LineMark: Copy {
    fn line_mark(self) -> Option<Mark>;
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One square of a sub-board. Write-once: once marked it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl LineMark for Cell {
    fn line_mark(self) -> Option<Mark> {
        match self {
            Self::Empty => None,
            Self::Marked(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Cell {
    fn from(value: Option<Mark>) -> Self {
        value.map_or(Self::Empty, Self::Marked)
    }
}

impl From<Cell> for Option<Mark> {
    fn from(cell: Cell) -> Self {
        cell.line_mark()
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The resolved state of a sub-board or of the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<OutcomeTag>", into = "Option<OutcomeTag>")]
pub enum Outcome {
    /// Still being played.
    #[default]
    Undecided,
    /// A player completed a line.
    Won(Mark),
    /// No line and no room left (or, for the game, no line possible).
    Draw,
}

impl Outcome {
    /// `true` for `Won` and `Draw`.
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

/// A drawn sub-board is not a winning mark on the big board.
impl LineMark for Outcome {
    fn line_mark(self) -> Option<Mark> {
        match self {
            Self::Won(mark) => Some(mark),
            Self::Undecided | Self::Draw => None,
        }
    }
}

/// Wire representation of a decided outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum OutcomeTag {
    X,
    O,
    #[serde(rename = "DRAW")]
    Draw,
}

impl From<Option<OutcomeTag>> for Outcome {
    fn from(value: Option<OutcomeTag>) -> Self {
        match value {
            None => Self::Undecided,
            Some(OutcomeTag::X) => Self::Won(Mark::X),
            Some(OutcomeTag::O) => Self::Won(Mark::O),
            Some(OutcomeTag::Draw) => Self::Draw,
        }
    }
}

impl From<Outcome> for Option<OutcomeTag> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Undecided => None,
            Outcome::Won(Mark::X) => Some(OutcomeTag::X),
            Outcome::Won(Mark::O) => Some(OutcomeTag::O),
            Outcome::Draw => Some(OutcomeTag::Draw),
        }
    }
}

// ---------------------------------------------------------------------------
// ActiveBoard
// ---------------------------------------------------------------------------

/// Where the player to move is allowed to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<usize>", into = "Option<usize>")]
pub enum ActiveBoard {
    /// Any sub-board that is not yet decided.
    #[default]
    Any,
    /// Only this sub-board. Always refers to an undecided sub-board.
    Board(usize),
}

impl TryFrom<Option<usize>> for ActiveBoard {
    type Error = RulesError;

    fn try_from(value: Option<usize>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(Self::Any),
            Some(index) if index < BOARD_SIZE => Ok(Self::Board(index)),
            Some(index) => Err(RulesError::InvalidActiveBoard(index)),
        }
    }
}

impl From<ActiveBoard> for Option<usize> {
    fn from(active: ActiveBoard) -> Self {
        match active {
            ActiveBoard::Any => None,
            ActiveBoard::Board(index) => Some(index),
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A request to mark `cell` inside `sub_board`.
///
/// Both indices are guaranteed to be in `0..9`; construct with
/// [`Move::new`]. Serialized as `{"bigIndex": .., "smallIndex": ..}`,
/// which is also how `lastMove` appears in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    #[serde(rename = "bigIndex")]
    sub_board: usize,
    #[serde(rename = "smallIndex")]
    cell: usize,
}

impl Move {
    /// Builds a move, rejecting indices outside the 9×9 grid.
    pub fn new(sub_board: usize, cell: usize) -> Result<Self, RulesError> {
        if sub_board >= BOARD_SIZE || cell >= BOARD_SIZE {
            return Err(RulesError::InvalidPosition { sub_board, cell });
        }
        Ok(Self { sub_board, cell })
    }

    /// Index of the targeted sub-board (the "big" index).
    pub fn sub_board(self) -> usize {
        self.sub_board
    }

    /// Index of the targeted cell within the sub-board (the "small" index).
    pub fn cell(self) -> usize {
        self.cell
    }
}

#[derive(Deserialize)]
struct RawMove {
    #[serde(rename = "bigIndex")]
    sub_board: usize,
    #[serde(rename = "smallIndex")]
    cell: usize,
}

impl TryFrom<RawMove> for Move {
    type Error = RulesError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Self::new(raw.sub_board, raw.cell)
    }
}

// ---------------------------------------------------------------------------
// TurnState
// ---------------------------------------------------------------------------

/// Whose turn it is and where they may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: Mark,
    pub active_board: ActiveBoard,
}

impl Default for TurnState {
    /// X to move, anywhere.
    fn default() -> Self {
        Self {
            current_player: Mark::X,
            active_board: ActiveBoard::Any,
        }
    }
}
