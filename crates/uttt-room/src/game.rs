//! The match state machine.
//!
//! `GameRoom` owns the mutable state of one match and is the only place a
//! move is turned into a state change. It does no I/O: the room actor
//! decides who hears about the result.

use uttt_protocol::GameSnapshot;
use uttt_rules::{
    next_active_board, validate_move, Mark, Move, Outcome, SuperBoard, TurnState,
};

use crate::{RoomError, RoomState};

/// What an accepted move did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveApplied {
    /// Play continues; the turn has passed to the other mark.
    Continued,
    /// The move ended the game with this result (`Won` or `Draw`).
    Concluded(Outcome),
}

/// State of one match: board, turn, last move, result.
#[derive(Debug, Clone, Default)]
pub struct GameRoom {
    board: SuperBoard,
    turn: TurnState,
    last_move: Option<Move>,
    winner: Outcome,
    state: RoomState,
}

impl GameRoom {
    /// Empty board, X to move anywhere, no winner.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn board(&self) -> &SuperBoard {
        &self.board
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn winner(&self) -> Outcome {
        self.winner
    }

    /// Applies `mv` on behalf of `mover`.
    ///
    /// On any error the state is untouched. The order of updates matters:
    /// the sub-board outcome is recomputed before the next active board is
    /// derived, so a move that closes the very board it points at frees
    /// the opponent to play anywhere.
    ///
    /// # Errors
    /// - [`RoomError::GameConcluded`] — the match already has a result
    /// - [`RoomError::Rejected`] — the move breaks a rule
    pub fn apply_move(&mut self, mover: Mark, mv: Move) -> Result<MoveApplied, RoomError> {
        if !self.state.is_active() {
            return Err(RoomError::GameConcluded);
        }
        validate_move(&self.board, &self.turn, mv, mover)?;

        self.board.place(mv, mover)?;
        self.last_move = Some(mv);

        let outcome = self.board.game_outcome();
        if outcome.is_decided() {
            self.winner = outcome;
            self.state = RoomState::Concluded;
            return Ok(MoveApplied::Concluded(outcome));
        }

        self.turn.active_board = next_active_board(mv.cell(), &self.board);
        self.turn.current_player = mover.opponent();
        Ok(MoveApplied::Continued)
    }

    /// Full snapshot for the `GAME_STATE` message.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            small_boards: *self.board.boards(),
            big_board_winners: *self.board.outcomes(),
            current_player: self.turn.current_player,
            active_board: self.turn.active_board,
            last_move: self.last_move,
            winner: self.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uttt_rules::{ActiveBoard, Cell, MoveRejection, SubBoard, BOARD_SIZE};

    const X: Cell = Cell::Marked(Mark::X);
    const O: Cell = Cell::Marked(Mark::O);
    const E: Cell = Cell::Empty;

    fn mv(sub_board: usize, cell: usize) -> Move {
        Move::new(sub_board, cell).unwrap()
    }

    /// Plays a list of (mark, sub-board, cell), asserting each is accepted.
    fn play(room: &mut GameRoom, moves: &[(Mark, usize, usize)]) {
        for &(mark, sub, cell) in moves {
            room.apply_move(mark, mv(sub, cell))
                .unwrap_or_else(|e| panic!("{mark} at ({sub},{cell}) rejected: {e}"));
        }
    }

    /// X takes the top row of sub-board 4 while O answers in 0 and 1.
    /// Leaves O to move, sent to board 2.
    fn room_with_board_4_won_by_x() -> GameRoom {
        let mut room = GameRoom::new();
        play(
            &mut room,
            &[
                (Mark::X, 4, 0),
                (Mark::O, 0, 4),
                (Mark::X, 4, 1),
                (Mark::O, 1, 4),
                (Mark::X, 4, 2),
            ],
        );
        room
    }

    #[test]
    fn test_new_room_initial_state() {
        let room = GameRoom::new();
        assert_eq!(room.state(), RoomState::Active);
        assert_eq!(room.turn(), TurnState::default());
        assert_eq!(room.last_move(), None);
        assert_eq!(room.winner(), Outcome::Undecided);
    }

    #[test]
    fn test_apply_move_first_move_sets_cell_turn_and_active_board() {
        let mut room = GameRoom::new();

        let applied = room.apply_move(Mark::X, mv(4, 0)).unwrap();

        assert_eq!(applied, MoveApplied::Continued);
        assert_eq!(room.board().sub_board(4).cell(0), Some(X));
        assert_eq!(room.last_move(), Some(mv(4, 0)));
        assert_eq!(room.turn().active_board, ActiveBoard::Board(0));
        assert_eq!(room.turn().current_player, Mark::O);
    }

    #[test]
    fn test_apply_move_rejected_leaves_state_unchanged() {
        let mut room = GameRoom::new();
        room.apply_move(Mark::X, mv(4, 0)).unwrap();
        let before = room.snapshot();

        let wrong_turn = room.apply_move(Mark::X, mv(0, 1));
        let wrong_board = room.apply_move(Mark::O, mv(5, 1));

        assert!(matches!(
            wrong_turn,
            Err(RoomError::Rejected(MoveRejection::NotYourTurn))
        ));
        assert!(matches!(
            wrong_board,
            Err(RoomError::Rejected(MoveRejection::WrongSubBoard))
        ));
        assert_eq!(room.snapshot(), before);
    }

    #[test]
    fn test_apply_move_occupied_cell_rejected() {
        let mut room = GameRoom::new();
        // X plays 0/0, sending O to board 0; O can't reuse that cell.
        room.apply_move(Mark::X, mv(0, 0)).unwrap();

        let result = room.apply_move(Mark::O, mv(0, 0));

        assert!(matches!(
            result,
            Err(RoomError::Rejected(MoveRejection::CellOccupied))
        ));
        assert_eq!(room.board().sub_board(0).cell(0), Some(X));
    }

    #[test]
    fn test_apply_move_sub_board_win_recorded_in_big_board() {
        let room = room_with_board_4_won_by_x();

        assert_eq!(room.board().outcome(4), Outcome::Won(Mark::X));
        assert_eq!(room.snapshot().big_board_winners[4], Outcome::Won(Mark::X));
        // X's last cell was 2, board 2 is open.
        assert_eq!(room.turn().active_board, ActiveBoard::Board(2));
        assert_eq!(room.state(), RoomState::Active);
    }

    #[test]
    fn test_apply_move_into_decided_board_rejected_even_with_free_choice() {
        let mut room = room_with_board_4_won_by_x();
        // O plays cell 4 of board 2, which points at the decided board 4.
        room.apply_move(Mark::O, mv(2, 4)).unwrap();
        assert_eq!(room.turn().active_board, ActiveBoard::Any);

        let result = room.apply_move(Mark::X, mv(4, 5));

        assert!(matches!(
            result,
            Err(RoomError::Rejected(MoveRejection::SubBoardDecided))
        ));
    }

    #[test]
    fn test_apply_move_closing_target_board_frees_choice() {
        // X holds 4 and 8 of sub-board 0 and plays cell 0: the diagonal
        // closes board 0, and cell 0 points straight back at it.
        let mut room = GameRoom::new();
        room.board = {
            let mut boards = [SubBoard::new(); BOARD_SIZE];
            boards[0] = SubBoard::from_cells([E, O, O, E, X, E, E, E, X]);
            uttt_rules::SuperBoard::from_boards(boards)
        };
        room.turn = TurnState {
            current_player: Mark::X,
            active_board: ActiveBoard::Board(0),
        };

        let applied = room.apply_move(Mark::X, mv(0, 0)).unwrap();

        assert_eq!(applied, MoveApplied::Continued);
        assert_eq!(room.board().outcome(0), Outcome::Won(Mark::X));
        assert_eq!(room.turn().active_board, ActiveBoard::Any);
        assert_eq!(room.turn().current_player, Mark::O);
    }

    #[test]
    fn test_apply_move_game_won_concludes_and_keeps_turn() {
        let mut room = GameRoom::new();
        // X already owns sub-boards 0 and 1; sub-board 2 has X at 0 and 1.
        room.board = {
            let mut boards = [SubBoard::new(); BOARD_SIZE];
            boards[0] = SubBoard::from_cells([X, X, X, E, E, E, E, E, E]);
            boards[1] = SubBoard::from_cells([X, X, X, O, O, E, E, E, E]);
            boards[2] = SubBoard::from_cells([X, X, E, O, O, E, E, E, E]);
            uttt_rules::SuperBoard::from_boards(boards)
        };
        room.turn = TurnState {
            current_player: Mark::X,
            active_board: ActiveBoard::Board(2),
        };

        let applied = room.apply_move(Mark::X, mv(2, 2)).unwrap();

        assert_eq!(applied, MoveApplied::Concluded(Outcome::Won(Mark::X)));
        assert_eq!(room.state(), RoomState::Concluded);
        assert_eq!(room.winner(), Outcome::Won(Mark::X));
        assert_eq!(room.last_move(), Some(mv(2, 2)));
        assert_eq!(room.turn().current_player, Mark::X);
    }

    #[test]
    fn test_apply_move_last_board_drawn_concludes_game_as_draw() {
        let mut room = GameRoom::new();
        // Big board:  X O X / X O O / O X ?, no line possible.
        // Sub-board 8 is one cell short of a draw.
        room.board = {
            let won_x = SubBoard::from_cells([X, X, X, E, E, E, E, E, E]);
            let won_o = SubBoard::from_cells([O, O, O, E, E, E, E, E, E]);
            let boards = [
                won_x,
                won_o,
                won_x,
                won_x,
                won_o,
                won_o,
                won_o,
                won_x,
                SubBoard::from_cells([X, O, X, X, O, O, O, X, E]),
            ];
            uttt_rules::SuperBoard::from_boards(boards)
        };
        room.turn = TurnState {
            current_player: Mark::X,
            active_board: ActiveBoard::Board(8),
        };

        let applied = room.apply_move(Mark::X, mv(8, 8)).unwrap();

        assert_eq!(applied, MoveApplied::Concluded(Outcome::Draw));
        assert_eq!(room.board().outcome(8), Outcome::Draw);
        assert_eq!(room.winner(), Outcome::Draw);
        assert_eq!(room.state(), RoomState::Concluded);
    }

    #[test]
    fn test_apply_move_after_conclusion_is_refused() {
        let mut room = GameRoom::new();
        room.state = RoomState::Concluded;
        room.winner = Outcome::Won(Mark::O);

        let result = room.apply_move(Mark::X, mv(0, 0));

        assert!(matches!(result, Err(RoomError::GameConcluded)));
        assert_eq!(room.board().sub_board(0).cell(0), Some(E));
    }

    #[test]
    fn test_apply_move_cells_are_written_at_most_once() {
        // Replay a fixed game, also firing a repeat at every cell already
        // played; repeats must bounce and the original mark must survive.
        let mut room = GameRoom::new();
        let moves = [
            (Mark::X, 4, 0),
            (Mark::O, 0, 4),
            (Mark::X, 4, 4),
            (Mark::O, 4, 8),
            (Mark::X, 8, 4),
            (Mark::O, 4, 2),
        ];
        let mut played = Vec::new();
        for (mark, sub, cell) in moves {
            room.apply_move(mark, mv(sub, cell)).unwrap();
            played.push((mark, sub, cell));
            for &(owner, s, c) in &played {
                let mover = room.turn().current_player;
                let _ = room.apply_move(mover, mv(s, c));
                assert_eq!(room.board().sub_board(s).cell(c), Some(Cell::Marked(owner)));
            }
        }
    }
}
