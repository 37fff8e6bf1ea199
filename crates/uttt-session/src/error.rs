//! Error types for the session layer.

use uttt_protocol::SessionId;
use uttt_room::RoomError;

/// Errors that can occur while routing session events.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists with this ID (never connected, or already gone).
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// A room operation failed underneath.
    #[error(transparent)]
    Room(#[from] RoomError),
}
