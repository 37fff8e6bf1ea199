//! Room actor: an isolated Tokio task that owns one [`GameRoom`].
//!
//! Each room runs in its own task and talks to the outside world through
//! an mpsc channel. Commands are handled strictly one after another, so
//! two near-simultaneous moves are evaluated in arrival order, the second
//! against the state the first produced.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use uttt_protocol::{RoomId, ServerMessage};
use uttt_rules::{Mark, Move};

use crate::{GameRoom, MoveApplied, RoomError, RoomState};

/// Channel sender for delivering outbound messages to one session.
///
/// Unbounded so the room never waits on a slow client; the session's
/// writer task drains it onto the connection.
pub type SessionSender = mpsc::UnboundedSender<ServerMessage>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Apply a move for the given mark. Indices are as the client sent
    /// them; the actor range-checks them.
    Move {
        mark: Mark,
        big_index: usize,
        small_index: usize,
    },

    /// Stop sending to this mark without notifying the other player.
    /// Used when a player walks away from a finished match.
    Leave {
        mark: Mark,
        reply: oneshot::Sender<usize>,
    },

    /// The mark's connection closed: tell the other player, then stop.
    Abandon { mark: Mark },

    /// Request room metadata.
    GetInfo { reply: oneshot::Sender<RoomInfo> },

    /// Stop the actor without notifying anyone.
    Shutdown,
}

/// A snapshot of room metadata (not the board itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub state: RoomState,
    /// Players still receiving updates from this room.
    pub player_count: usize,
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone; the `RoomManager` holds one per room and callers clone
/// it out so they can await without holding any lock.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique ID.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Queues a move (fire-and-forget). The outcome reaches the players
    /// as `GAME_STATE` or, for the mover only, `ERROR`.
    ///
    /// The indices are unchecked: a concluded room ignores any move, in
    /// range or not, so the range check belongs to the actor.
    pub async fn send_move(
        &self,
        mark: Mark,
        big_index: usize,
        small_index: usize,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Move {
                mark,
                big_index,
                small_index,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Detaches `mark` from the room. Returns how many players remain.
    pub async fn leave(&self, mark: Mark) -> Result<usize, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                mark,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Reports that `mark` disconnected. The actor notifies the other
    /// player and stops after handling everything queued before this.
    pub async fn abandon(&self, mark: Mark) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Abandon { mark })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Requests the current room info.
    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    game: GameRoom,
    /// Per-mark outbound channels. A mark is removed when it leaves.
    players: HashMap<Mark, SessionSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room actor started");
        self.announce();
        self.broadcast_state();

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Move {
                    mark,
                    big_index,
                    small_index,
                } => self.handle_move(mark, big_index, small_index),
                RoomCommand::Leave { mark, reply } => {
                    self.players.remove(&mark);
                    tracing::info!(room_id = %self.room_id, %mark, "player left room");
                    let _ = reply.send(self.players.len());
                }
                RoomCommand::Abandon { mark } => {
                    self.handle_abandon(mark);
                    break;
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room_id = %self.room_id, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    fn handle_move(&mut self, mark: Mark, big_index: usize, small_index: usize) {
        if !self.players.contains_key(&mark) {
            tracing::debug!(room_id = %self.room_id, %mark, "move from departed player, ignoring");
            return;
        }

        // Stale: the client hadn't seen the final state yet. Checked
        // before the range so every late move is dropped the same way.
        if !self.game.state().is_active() {
            tracing::debug!(room_id = %self.room_id, %mark, "move after game over, ignoring");
            return;
        }

        let mv = match Move::new(big_index, small_index) {
            Ok(mv) => mv,
            Err(e) => {
                tracing::debug!(room_id = %self.room_id, %mark, error = %e, "move out of range");
                self.send_to(mark, ServerMessage::error("invalid position"));
                return;
            }
        };

        match self.game.apply_move(mark, mv) {
            Ok(MoveApplied::Continued) => self.broadcast_state(),
            Ok(MoveApplied::Concluded(outcome)) => {
                tracing::info!(room_id = %self.room_id, ?outcome, "game concluded");
                self.broadcast_state();
            }
            Err(e) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %mark,
                    big_index = mv.sub_board(),
                    small_index = mv.cell(),
                    reason = %e,
                    "move rejected"
                );
                self.send_to(mark, ServerMessage::error(e.to_string()));
            }
        }
    }

    fn handle_abandon(&mut self, mark: Mark) {
        self.players.remove(&mark);
        tracing::info!(room_id = %self.room_id, %mark, "player disconnected, closing room");
        for sender in self.players.values() {
            let _ = sender.send(ServerMessage::opponent_disconnect());
        }
        self.players.clear();
    }

    /// Tells each player which mark it plays.
    fn announce(&self) {
        for (&symbol, sender) in &self.players {
            let _ = sender.send(ServerMessage::GameStart {
                symbol,
                room_id: self.room_id,
            });
        }
    }

    /// Sends the full snapshot to every attached player.
    fn broadcast_state(&self) {
        let msg = ServerMessage::GameState(self.game.snapshot());
        for sender in self.players.values() {
            let _ = sender.send(msg.clone());
        }
    }

    /// Sends to one player. Silently drops if the receiver is gone.
    fn send_to(&self, mark: Mark, msg: ServerMessage) {
        if let Some(sender) = self.players.get(&mark) {
            let _ = sender.send(msg);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id,
            state: self.game.state(),
            player_count: self.players.len(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate with it.
///
/// The actor opens by sending `GAME_START` to each player, then the initial
/// `GAME_STATE`, so both arrive in that order on every player's channel.
pub(crate) fn spawn_room(
    room_id: RoomId,
    x: SessionSender,
    o: SessionSender,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id,
        game: GameRoom::new(),
        players: HashMap::from([(Mark::X, x), (Mark::O, o)]),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
