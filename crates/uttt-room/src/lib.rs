//! Room lifecycle for the Ultimate Tic-Tac-Toe server.
//!
//! A room is one match between exactly two sessions. Its state lives in a
//! [`GameRoom`] owned by a dedicated Tokio task (actor model): every move,
//! leave and teardown for that room goes through the actor's command
//! channel, so they are applied one at a time in arrival order.
//!
//! # Key types
//!
//! - [`GameRoom`] — the `Active → Concluded` state machine, no I/O
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomManager`] — creates, tracks and destroys room actors
//! - [`RoomConfig`] / [`RoomState`]

mod config;
mod error;
mod game;
mod manager;
mod room;

pub use config::{RoomConfig, RoomState};
pub use error::RoomError;
pub use game::{GameRoom, MoveApplied};
pub use manager::RoomManager;
pub use room::{RoomHandle, RoomInfo, SessionSender};
