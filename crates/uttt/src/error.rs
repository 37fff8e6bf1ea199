//! Unified error type for the server.

use uttt_protocol::ProtocolError;
use uttt_session::SessionError;
use uttt_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum UtttError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error. Room failures arrive wrapped in here,
    /// since handlers only ever talk to rooms through the registry.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}
