//! The rule functions: win/draw detection, move legality, next active board.

use crate::{
    ActiveBoard, Cell, LineMark, Mark, Move, MoveRejection, Outcome, SubBoard,
    SuperBoard, TurnState, BOARD_SIZE,
};

/// The eight three-in-a-row triples, in the order they are checked:
/// rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the mark that fills a whole line of `seq`, if any.
///
/// Works on any 9-slot sequence: cells of a sub-board, or the outcomes of
/// the super-board. The first matching line in [`LINES`] order wins.
pub fn check_line<T: LineMark>(seq: &[T; BOARD_SIZE]) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = seq[a].line_mark()?;
        (seq[b].line_mark() == Some(mark) && seq[c].line_mark() == Some(mark))
            .then_some(mark)
    })
}

/// `true` when no slot is empty.
pub fn is_full(cells: &[Cell; BOARD_SIZE]) -> bool {
    cells.iter().all(|cell| !cell.is_empty())
}

/// Line winner first; otherwise a full board is a draw.
pub fn sub_board_outcome(board: &SubBoard) -> Outcome {
    match check_line(board.cells()) {
        Some(mark) => Outcome::Won(mark),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Undecided,
    }
}

/// The game result over the big-board outcomes.
///
/// Drawn sub-boards never count toward a line. The game is a draw only
/// once every sub-board is decided and no line of wins exists.
pub fn game_outcome(outcomes: &[Outcome; BOARD_SIZE]) -> Outcome {
    match check_line(outcomes) {
        Some(mark) => Outcome::Won(mark),
        None if outcomes.iter().all(|o| o.is_decided()) => Outcome::Draw,
        None => Outcome::Undecided,
    }
}

/// Where the opponent must play after a mark lands on `played_cell`.
///
/// The target is the sub-board with the same index as the cell. If that
/// sub-board is decided or full, the opponent may play anywhere. Call this
/// only after the outcomes have been recomputed for the move just played.
pub fn next_active_board(played_cell: usize, board: &SuperBoard) -> ActiveBoard {
    let target = board.sub_board(played_cell);
    if board.outcome(played_cell).is_decided() || target.is_full() {
        ActiveBoard::Any
    } else {
        ActiveBoard::Board(played_cell)
    }
}

/// Checks `mv` by `mover` against the board and turn state.
///
/// Checks run in a fixed order so the reported reason is deterministic
/// when several are violated: turn, active board, decided sub-board,
/// occupied cell.
pub fn validate_move(
    board: &SuperBoard,
    turn: &TurnState,
    mv: Move,
    mover: Mark,
) -> Result<(), MoveRejection> {
    if mover != turn.current_player {
        return Err(MoveRejection::NotYourTurn);
    }
    if let ActiveBoard::Board(active) = turn.active_board {
        if mv.sub_board() != active {
            return Err(MoveRejection::WrongSubBoard);
        }
    }
    if board.outcome(mv.sub_board()).is_decided() {
        return Err(MoveRejection::SubBoardDecided);
    }
    if board.sub_board(mv.sub_board()).cell(mv.cell()) != Some(Cell::Empty) {
        return Err(MoveRejection::CellOccupied);
    }
    Ok(())
}
