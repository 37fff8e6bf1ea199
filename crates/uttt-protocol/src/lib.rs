//! Wire protocol for the Ultimate Tic-Tac-Toe server.
//!
//! This crate defines what travels over a player's connection:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`GameSnapshot`]) —
//!   one tagged enum per direction, `{"type": "<TAG>", ...fields}` on the
//!   wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   turned into text and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (frames) → Protocol (ClientMessage) → Session registry
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, GameSnapshot, RoomId, ServerMessage, SessionId};
