//! # uttt
//!
//! Server-authoritative Ultimate Tic-Tac-Toe.
//!
//! Players connect over WebSocket, send `JOIN_GAME`, get paired two at a
//! time, and play by sending `MOVE`. The server validates every move and
//! pushes the full board to both players after each accepted one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uttt::prelude::*;
//!
//! # async fn run() -> Result<(), UtttError> {
//! let server = UtttServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::UtttError;
pub use server::{UtttServer, UtttServerBuilder};

/// Re-exports of the types most callers need.
pub mod prelude {
    pub use crate::{ServerConfig, UtttError, UtttServer, UtttServerBuilder};

    pub use uttt_protocol::{ClientMessage, GameSnapshot, RoomId, ServerMessage, SessionId};
    pub use uttt_rules::{ActiveBoard, Cell, Mark, Move, MoveRejection, Outcome};
}
