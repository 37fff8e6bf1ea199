//! Room configuration and state machine.

use std::fmt;

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Configuration shared by every room the manager spawns.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Capacity of each room actor's command channel. When full, senders
    /// wait (backpressure) rather than dropping commands.
    pub channel_size: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

/// The lifecycle state of a match.
///
/// ```text
/// Active ──(win or draw)──→ Concluded
/// ```
///
/// There is no way back: once concluded, moves are ignored until the
/// room is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomState {
    #[default]
    Active,
    Concluded,
}

impl RoomState {
    /// Returns `true` while moves are accepted.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Concluded => write!(f, "Concluded"),
        }
    }
}
