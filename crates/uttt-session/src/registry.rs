//! The session registry: routes connection events to the queue and rooms.
//!
//! # Concurrency note
//!
//! `SessionRegistry` is not thread-safe by itself. The server keeps it
//! behind a single `tokio::sync::Mutex`, which is what makes queue
//! operations mutually exclusive. Moves only take the lock long enough to
//! look up a [`Seat`]; the room actor serializes the rest.

use std::collections::HashMap;

use uttt_protocol::{RoomId, ServerMessage, SessionId};
use uttt_room::{RoomError, RoomHandle, RoomManager, RoomState, SessionSender};
use uttt_rules::Mark;

use crate::{MatchmakingQueue, QueueOutcome, Session, SessionError};

/// Everything needed to submit a move on behalf of a seated player,
/// detached from the registry so the lock can be released first.
#[derive(Clone)]
pub struct Seat {
    session_id: SessionId,
    mark: Mark,
    room: RoomHandle,
}

impl Seat {
    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn room_id(&self) -> RoomId {
        self.room.room_id()
    }

    /// Submits a move to the room.
    ///
    /// The room range-checks the indices, after its game-over check, so a
    /// late move is dropped whatever it contains. A room that has already
    /// stopped swallows the move.
    pub async fn play(&self, big_index: usize, small_index: usize) -> Result<(), SessionError> {
        // Waits only if this room's command queue is full; the registry
        // lock is not held here.
        match self.room.send_move(self.mark, big_index, small_index).await {
            Ok(()) => Ok(()),
            Err(RoomError::Unavailable(room_id)) => {
                tracing::debug!(session_id = %self.session_id, %room_id, "room gone, move ignored");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Tracks every connected session, the matchmaking queue and the live
/// rooms.
///
/// ## Lifecycle
///
/// ```text
/// connect() ──→ join_game() ──→ [Waiting] ──→ join_game() by someone else
///                    │                               │
///                    ▼                               ▼
///               [in a room] ←──────────────── room created (X = waiter)
///                    │
///                    ▼
///              disconnect() ──→ opponent gets OPPONENT_DISCONNECT,
///                               room discarded
/// ```
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    queue: MatchmakingQueue,
    rooms: RoomManager,
    next_id: u64,
}

impl SessionRegistry {
    /// Creates a registry around an explicit queue and room manager.
    pub fn new(queue: MatchmakingQueue, rooms: RoomManager) -> Self {
        Self {
            sessions: HashMap::new(),
            queue,
            rooms,
            next_id: 1,
        }
    }

    /// Registers a new connection. The session starts with no mark and no
    /// room.
    pub fn connect(&mut self, sender: SessionSender) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, Session::new(id, sender));
        tracing::info!(session_id = %id, "session connected");
        id
    }

    /// Handles `JOIN_GAME`.
    ///
    /// - already waiting: `WAITING` is sent again
    /// - seated in an active room: `ERROR` "already in a game"
    /// - seated in a concluded room: leaves it quietly, then queues
    ///
    /// Pairing creates the room; the room actor then sends `GAME_START`
    /// and the first `GAME_STATE` to both players.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the session is unknown.
    pub async fn join_game(&mut self, session_id: SessionId) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        // Asking the room for its state awaits the actor while the caller
        // still holds the registry lock. That keeps a concurrent join from
        // slipping into the queue between the check and the enqueue.
        if let Some((room_id, mark)) = session.seat() {
            if !self.leave_concluded_room(session_id, room_id, mark).await? {
                self.send_to(session_id, ServerMessage::error("already in a game"));
                return Ok(());
            }
        }

        // The queue decides pairing in one step; nothing awaits between
        // enqueue and seating both players.
        match self.queue.enqueue(session_id) {
            QueueOutcome::Waiting => {
                tracing::info!(%session_id, "session waiting for an opponent");
                self.send_to(session_id, ServerMessage::waiting());
            }
            QueueOutcome::Paired { x, o } => self.start_room(x, o),
        }
        Ok(())
    }

    /// Looks up where a `MOVE` from this session should go. `None` means
    /// the session isn't seated and the move is ignored.
    pub fn seat(&self, session_id: SessionId) -> Option<Seat> {
        let session = self.sessions.get(&session_id)?;
        let (room_id, mark) = session.seat()?;
        let room = self.rooms.get(&room_id)?.clone();
        Some(Seat {
            session_id,
            mark,
            room,
        })
    }

    /// Handles a closed connection.
    ///
    /// Removes the session, frees the waiting slot if it held it, and
    /// tears down its room: the other player is told once and unseated.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the session is unknown.
    pub async fn disconnect(&mut self, session_id: SessionId) -> Result<(), SessionError> {
        let session = self
            .sessions
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        if self.queue.remove(session_id) {
            tracing::info!(%session_id, "waiting session left the queue");
        }

        if let Some((room_id, mark)) = session.seat() {
            // Forget the room first so no new MOVE can look it up. The
            // actor still drains moves queued before the abandon, then
            // tells the other player and stops on its own.
            if let Some(room) = self.rooms.remove(&room_id) {
                if let Err(e) = room.abandon(mark).await {
                    tracing::debug!(%session_id, %room_id, error = %e, "room already stopped");
                }
            }
            // The survivor must rejoin the queue to play again.
            for other in self.sessions.values_mut() {
                if other.room_id == Some(room_id) {
                    other.unseat();
                }
            }
        }

        tracing::info!(%session_id, "session disconnected");
        Ok(())
    }

    pub fn session(&self, session_id: SessionId) -> Option<&Session> {
        self.sessions.get(&session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn queue(&self) -> &MatchmakingQueue {
        &self.queue
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    /// Detaches the session from a concluded room. Returns `false` if the
    /// room is still being played, leaving everything as it was.
    async fn leave_concluded_room(
        &mut self,
        session_id: SessionId,
        room_id: RoomId,
        mark: Mark,
    ) -> Result<bool, SessionError> {
        let Some(room) = self.rooms.get(&room_id).cloned() else {
            self.unseat(session_id);
            return Ok(true);
        };

        let remaining = match room.get_info().await {
            Ok(info) if info.state == RoomState::Active => return Ok(false),
            Ok(_) => room.leave(mark).await.unwrap_or(0),
            // The actor is gone; nothing to leave.
            Err(_) => 0,
        };

        self.unseat(session_id);
        tracing::info!(%session_id, %room_id, "session left finished room");

        if remaining == 0 {
            match self.rooms.destroy_room(room_id).await {
                Ok(()) | Err(RoomError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }

    /// Creates a room for a fresh pair and seats both players.
    fn start_room(&mut self, x: SessionId, o: SessionId) {
        let senders = self
            .sessions
            .get(&x)
            .map(|s| s.sender.clone())
            .zip(self.sessions.get(&o).map(|s| s.sender.clone()));

        let Some((x_sender, o_sender)) = senders else {
            // The waiter vanished without leaving the queue; the joiner
            // takes the slot instead.
            tracing::warn!(%x, %o, "paired with a missing session, requeueing");
            self.queue.enqueue(o);
            self.send_to(o, ServerMessage::waiting());
            return;
        };

        let room = self.rooms.create_room(x_sender, o_sender);
        let room_id = room.room_id();
        if let Some(s) = self.sessions.get_mut(&x) {
            s.assign(room_id, Mark::X);
        }
        if let Some(s) = self.sessions.get_mut(&o) {
            s.assign(room_id, Mark::O);
        }
        tracing::info!(%room_id, %x, %o, "players paired");
    }

    fn unseat(&mut self, session_id: SessionId) {
        if let Some(s) = self.sessions.get_mut(&session_id) {
            s.unseat();
        }
    }

    fn send_to(&self, session_id: SessionId, msg: ServerMessage) {
        if let Some(s) = self.sessions.get(&session_id) {
            s.send(msg);
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(MatchmakingQueue::new(), RoomManager::default())
    }
}
