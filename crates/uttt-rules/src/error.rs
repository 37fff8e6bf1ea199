//! Error types for the rules layer.

/// Why a move was refused by [`validate_move`](crate::validate_move).
///
/// The `Display` text of each variant is exactly what the player sees in
/// the `ERROR` message, so keep these short and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    /// The moving player is not the one whose turn it is.
    #[error("not your turn")]
    NotYourTurn,

    /// The active board is pinned and the move targets another one.
    #[error("wrong sub-board")]
    WrongSubBoard,

    /// The targeted sub-board already has a winner or is drawn.
    #[error("sub-board already decided")]
    SubBoardDecided,

    /// The targeted cell already holds a mark.
    #[error("cell occupied")]
    CellOccupied,
}

/// Errors building rule values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A sub-board or cell index outside `0..9`.
    #[error("invalid position: sub-board {sub_board}, cell {cell}")]
    InvalidPosition { sub_board: usize, cell: usize },

    /// An active-board index outside `0..9`.
    #[error("invalid active board: {0}")]
    InvalidActiveBoard(usize),
}
