//! Per-connection handler: session setup, outbound writer, inbound routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register a session → get a `SessionId` and an outbound channel
//!   2. Spawn a writer task draining that channel onto the socket
//!   3. Loop: receive frames → decode → `JOIN_GAME` / `MOVE`
//!   4. On close, the session guard runs the disconnect

use std::sync::Arc;

use tokio::sync::mpsc;
use uttt_protocol::{ClientMessage, Codec, JsonCodec, ServerMessage, SessionId};
use uttt_transport::{Connection, WebSocketConnection};

use crate::server::ServerState;
use crate::UtttError;

/// Drop guard that disconnects the session when the handler exits.
///
/// Runs even if the handler panics. `Drop` is synchronous, so the async
/// disconnect goes into a fire-and-forget task.
struct SessionGuard {
    session_id: SessionId,
    state: Arc<ServerState>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let session_id = self.session_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut registry = state.registry.lock().await;
            if let Err(e) = registry.disconnect(session_id).await {
                tracing::debug!(%session_id, error = %e, "disconnect cleanup failed");
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), UtttError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();

    let (outbox_tx, outbox_rx) = mpsc::unbounded_channel();
    let session_id = state.registry.lock().await.connect(outbox_tx);
    let _guard = SessionGuard {
        session_id,
        state: Arc::clone(&state),
    };

    tracing::info!(%conn_id, %session_id, "connection accepted");

    // The writer owns the outbound half: rooms and the registry push into
    // the outbox without ever touching the socket.
    let writer = tokio::spawn(write_loop(Arc::clone(&conn), outbox_rx, state.codec));
    let result = read_loop(&conn, &state, session_id).await;
    // Nobody is left to read what's still queued.
    writer.abort();

    // _guard drops here → session disconnect fires.
    result
}

/// Receives frames until the peer goes away.
async fn read_loop(
    conn: &WebSocketConnection,
    state: &ServerState,
    session_id: SessionId,
) -> Result<(), UtttError> {
    loop {
        let received = match state.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, conn.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    tracing::info!(%session_id, "connection idle, closing");
                    let _ = conn.close().await;
                    return Ok(());
                }
            },
            None => conn.recv().await,
        };

        let data = match received {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%session_id, "connection closed");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%session_id, error = %e, "recv error");
                return Ok(());
            }
        };

        let msg: ClientMessage = match state.codec.decode(&data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%session_id, error = %e, "ignoring undecodable message");
                continue;
            }
        };

        dispatch(state, session_id, msg).await?;
    }
}

/// Routes one decoded message.
async fn dispatch(
    state: &ServerState,
    session_id: SessionId,
    msg: ClientMessage,
) -> Result<(), UtttError> {
    match msg {
        ClientMessage::JoinGame => {
            // Held for the whole join, including any await on a room, so
            // pairing decisions never interleave across sessions.
            let mut registry = state.registry.lock().await;
            registry.join_game(session_id).await?;
        }
        ClientMessage::Move {
            big_index,
            small_index,
        } => {
            // Only the lookup needs the lock; the guard is a temporary and
            // drops at the end of this statement. From here the room's
            // command queue orders the move against its opponent's.
            let seat = state.registry.lock().await.seat(session_id);
            match seat {
                Some(seat) => seat.play(big_index, small_index).await?,
                // Not queued, not seated, or the room was torn down.
                None => {
                    tracing::debug!(%session_id, "move outside a room, ignoring");
                }
            }
        }
    }
    Ok(())
}

/// Drains the session's outbox onto the socket. Stops at the first failed
/// send; the read side then notices the close.
async fn write_loop(
    conn: Arc<WebSocketConnection>,
    mut outbox: mpsc::UnboundedReceiver<ServerMessage>,
    codec: JsonCodec,
) {
    while let Some(msg) = outbox.recv().await {
        let text = match codec.encode(&msg) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(conn_id = %conn.id(), error = %e, "failed to encode message");
                continue;
            }
        };
        if let Err(e) = conn.send(&text).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "send failed, stopping writer");
            break;
        }
    }
}
