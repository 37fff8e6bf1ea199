//! Message types for the game's wire format.
//!
//! Every message is a JSON object tagged by `type`:
//!
//! ```text
//! client → server   {"type":"JOIN_GAME"}
//!                   {"type":"MOVE","bigIndex":4,"smallIndex":0}
//! server → client   {"type":"WAITING","message":"..."}
//!                   {"type":"GAME_START","symbol":"X","roomId":1}
//!                   {"type":"GAME_STATE","smallBoards":[...],...}
//!                   {"type":"ERROR","message":"not your turn"}
//!                   {"type":"OPPONENT_DISCONNECT","message":"..."}
//! ```
//!
//! Unknown tags fail to decode rather than falling through; the session
//! registry logs and drops them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uttt_rules::{ActiveBoard, Mark, Move, Outcome, SubBoard, BOARD_SIZE};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Server-side identity of one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// Opaque identifier for one match. Serialized as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Messages a player's client may send.
///
/// Move indices are decoded as plain numbers; range checking happens when
/// they are turned into a [`Move`], so an out-of-range move can be answered
/// with an `ERROR` instead of being dropped as garbage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Enter matchmaking.
    JoinGame,

    /// Mark `small_index` inside sub-board `big_index`.
    Move { big_index: usize, small_index: usize },
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// Full state of one match, sent after room creation and every accepted
/// move. Never a diff: every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// 9 sub-boards × 9 cells; `null`, `"X"` or `"O"`.
    pub small_boards: [SubBoard; BOARD_SIZE],
    /// Outcome per sub-board; `null`, `"X"`, `"O"` or `"DRAW"`.
    pub big_board_winners: [Outcome; BOARD_SIZE],
    pub current_player: Mark,
    /// Sub-board index, or `null` when any open sub-board may be played.
    pub active_board: ActiveBoard,
    pub last_move: Option<Move>,
    /// `null` while the game is running.
    pub winner: Outcome,
}

/// Messages the server sends to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// Queued, no opponent yet.
    Waiting { message: String },

    /// A room was formed; `symbol` is this player's mark.
    GameStart { symbol: Mark, room_id: RoomId },

    /// Full snapshot of the room.
    GameState(GameSnapshot),

    /// A rejected move or other recoverable fault, sent to the offender only.
    Error { message: String },

    /// The other player's connection closed; the room is gone.
    OpponentDisconnect { message: String },
}

impl ServerMessage {
    pub fn waiting() -> Self {
        Self::Waiting {
            message: "waiting for an opponent".into(),
        }
    }

    pub fn opponent_disconnect() -> Self {
        Self::OpponentDisconnect {
            message: "opponent disconnected".into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! JSON shape tests. The browser client switches on these exact keys,
    //! so a renamed field is a protocol break.

    use super::*;
    use uttt_rules::{Cell, SuperBoard};

    fn empty_snapshot() -> GameSnapshot {
        let board = SuperBoard::new();
        GameSnapshot {
            small_boards: *board.boards(),
            big_board_winners: *board.outcomes(),
            current_player: Mark::X,
            active_board: ActiveBoard::Any,
            last_move: None,
            winner: Outcome::Undecided,
        }
    }

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_room_id_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&RoomId(99)).unwrap(), "99");
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(RoomId(3).to_string(), "R-3");
        assert_eq!(SessionId(7).to_string(), "S-7");
    }

    // =====================================================================
    // ClientMessage
    // =====================================================================

    #[test]
    fn test_client_join_game_decodes_from_bare_tag() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"JOIN_GAME"}"#).unwrap();
        assert_eq!(msg, ClientMessage::JoinGame);
    }

    #[test]
    fn test_client_move_decodes_camel_case_fields() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"MOVE","bigIndex":4,"smallIndex":0}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Move {
                big_index: 4,
                small_index: 0
            }
        );
    }

    #[test]
    fn test_client_move_missing_field_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"MOVE","bigIndex":4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_move_negative_index_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"MOVE","bigIndex":-1,"smallIndex":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_unknown_type_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"FLY_TO_MOON"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_missing_type_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"bigIndex":1,"smallIndex":2}"#);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerMessage
    // =====================================================================

    #[test]
    fn test_server_waiting_json_format() {
        let json = serde_json::to_value(ServerMessage::waiting()).unwrap();
        assert_eq!(json["type"], "WAITING");
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_server_game_start_json_format() {
        let json = serde_json::to_value(ServerMessage::GameStart {
            symbol: Mark::O,
            room_id: RoomId(5),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "GAME_START", "symbol": "O", "roomId": 5})
        );
    }

    #[test]
    fn test_server_game_state_initial_json_format() {
        let json = serde_json::to_value(ServerMessage::GameState(empty_snapshot())).unwrap();

        assert_eq!(json["type"], "GAME_STATE");
        assert_eq!(json["currentPlayer"], "X");
        assert!(json["activeBoard"].is_null());
        assert!(json["lastMove"].is_null());
        assert!(json["winner"].is_null());

        let boards = json["smallBoards"].as_array().unwrap();
        assert_eq!(boards.len(), 9);
        for board in boards {
            let cells = board.as_array().unwrap();
            assert_eq!(cells.len(), 9);
            assert!(cells.iter().all(|c| c.is_null()));
        }
        let winners = json["bigBoardWinners"].as_array().unwrap();
        assert_eq!(winners.len(), 9);
        assert!(winners.iter().all(|w| w.is_null()));
    }

    #[test]
    fn test_server_game_state_populated_fields() {
        let mut snapshot = empty_snapshot();
        let mut cells = [Cell::Empty; BOARD_SIZE];
        cells[0] = Cell::Marked(Mark::X);
        snapshot.small_boards[4] = SubBoard::from_cells(cells);
        snapshot.big_board_winners[2] = Outcome::Draw;
        snapshot.current_player = Mark::O;
        snapshot.active_board = ActiveBoard::Board(0);
        snapshot.last_move = Some(Move::new(4, 0).unwrap());
        snapshot.winner = Outcome::Won(Mark::X);

        let json = serde_json::to_value(ServerMessage::GameState(snapshot)).unwrap();

        assert_eq!(json["smallBoards"][4][0], "X");
        assert_eq!(json["bigBoardWinners"][2], "DRAW");
        assert_eq!(json["currentPlayer"], "O");
        assert_eq!(json["activeBoard"], 0);
        assert_eq!(
            json["lastMove"],
            serde_json::json!({"bigIndex": 4, "smallIndex": 0})
        );
        assert_eq!(json["winner"], "X");
    }

    #[test]
    fn test_server_game_state_decodes_back() {
        let msg = ServerMessage::GameState(empty_snapshot());
        let text = serde_json::to_string(&msg).unwrap();
        let decoded: ServerMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_server_opponent_disconnect_json_format() {
        let json = serde_json::to_value(ServerMessage::opponent_disconnect()).unwrap();
        assert_eq!(json["type"], "OPPONENT_DISCONNECT");
        assert_eq!(json["message"], "opponent disconnected");
    }
}
