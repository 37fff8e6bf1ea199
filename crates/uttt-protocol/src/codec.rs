//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A codec converts between Rust types and what goes on the wire. The
//! rest of the server only sees the [`Codec`] trait, so the format could
//! change without touching the session or room layers.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes values to wire text and decodes inbound frames.
///
/// Outbound messages are text because the browser client parses
/// `event.data` directly; inbound frames are accepted as raw bytes since
/// they may arrive as either text or binary frames.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into wire text.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes an inbound frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use uttt_protocol::{ClientMessage, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let msg: ClientMessage = codec
///     .decode(br#"{"type":"MOVE","bigIndex":4,"smallIndex":0}"#)
///     .unwrap();
/// assert_eq!(msg, ClientMessage::Move { big_index: 4, small_index: 0 });
///
/// let text = codec.encode(&ClientMessage::JoinGame).unwrap();
/// assert_eq!(text, r#"{"type":"JOIN_GAME"}"#);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
