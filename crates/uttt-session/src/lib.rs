//! Player sessions for the Ultimate Tic-Tac-Toe server.
//!
//! This crate tracks who is connected and where each player is:
//!
//! 1. **Sessions** ([`Session`]): one record per live connection, holding
//!    the outbound channel plus the assigned mark and room, if any.
//! 2. **Matchmaking** ([`MatchmakingQueue`]): at most one waiting player;
//!    the next joiner is paired with it.
//! 3. **Routing** ([`SessionRegistry`]): turns connect, `JOIN_GAME`,
//!    `MOVE` and disconnect events into queue and room operations.
//!
//! # How it fits in the stack
//!
//! ```text
//! Server (above)  ← one handler task per connection, calls the registry
//!     ↕
//! Session Layer (this crate)  ← identity, queue, who-is-in-which-room
//!     ↕
//! Room Layer (below)  ← one actor per match
//! ```

mod error;
mod queue;
mod registry;
mod session;

pub use error::SessionError;
pub use queue::{MatchmakingQueue, QueueOutcome};
pub use registry::{Seat, SessionRegistry};
pub use session::Session;
