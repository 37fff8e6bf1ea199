//! The session record: the server's view of one connected player.

use uttt_protocol::{RoomId, ServerMessage, SessionId};
use uttt_room::SessionSender;
use uttt_rules::Mark;

/// A single player's session on the server.
///
/// Created on connect with no mark and no room. `symbol` and `room_id` are
/// set together when the player is paired and cleared together when the
/// room goes away.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,

    /// Outbound channel to this player's connection writer.
    pub sender: SessionSender,

    /// The mark this player plays in its current room.
    pub symbol: Option<Mark>,

    pub room_id: Option<RoomId>,
}

impl Session {
    pub fn new(id: SessionId, sender: SessionSender) -> Self {
        Self {
            id,
            sender,
            symbol: None,
            room_id: None,
        }
    }

    /// Returns the room and mark, if this player is seated somewhere.
    pub fn seat(&self) -> Option<(RoomId, Mark)> {
        self.room_id.zip(self.symbol)
    }

    /// Seats the player in a room.
    pub fn assign(&mut self, room_id: RoomId, symbol: Mark) {
        self.room_id = Some(room_id);
        self.symbol = Some(symbol);
    }

    /// Clears the room and mark.
    pub fn unseat(&mut self) {
        self.room_id = None;
        self.symbol = None;
    }

    /// Queues a message for this player. A closed channel means the
    /// connection is going away; its disconnect will clean up.
    pub fn send(&self, msg: ServerMessage) {
        if self.sender.send(msg).is_err() {
            tracing::debug!(session_id = %self.id, "outbound channel closed, dropping message");
        }
    }
}
