//! Error types for the room layer.

use uttt_protocol::RoomId;
use uttt_rules::MoveRejection;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room's command channel is closed (the actor has stopped).
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// The match already has a result; no more moves are taken.
    #[error("game already over")]
    GameConcluded,

    /// The move broke a rule. Displays as the rejection reason itself.
    #[error(transparent)]
    Rejected(#[from] MoveRejection),
}
