//! Room manager: creates, tracks, and destroys room actors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use uttt_protocol::RoomId;

use crate::room::spawn_room;
use crate::{RoomConfig, RoomError, RoomHandle, SessionSender};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Owns the handle of every live room.
///
/// Which session sits in which room is the session registry's business;
/// this type only knows rooms.
pub struct RoomManager {
    rooms: HashMap<RoomId, RoomHandle>,
    config: RoomConfig,
}

impl RoomManager {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    /// Spawns a room with `x` and `o` attached and returns its handle.
    pub fn create_room(&mut self, x: SessionSender, o: SessionSender) -> RoomHandle {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let handle = spawn_room(room_id, x, o, self.config.channel_size);
        self.rooms.insert(room_id, handle.clone());
        tracing::info!(%room_id, "room created");
        handle
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&RoomHandle> {
        self.rooms.get(room_id)
    }

    /// Forgets a room without stopping it. Used after an abandon, where
    /// the actor stops on its own once it has notified the survivor.
    pub fn remove(&mut self, room_id: &RoomId) -> Option<RoomHandle> {
        let handle = self.rooms.remove(room_id);
        if handle.is_some() {
            tracing::info!(%room_id, "room removed");
        }
        handle
    }

    /// Shuts a room down and forgets it.
    pub async fn destroy_room(&mut self, room_id: RoomId) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        let _ = handle.shutdown().await;

        tracing::info!(%room_id, "room destroyed");
        Ok(())
    }

    /// Returns the number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all live room IDs.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
