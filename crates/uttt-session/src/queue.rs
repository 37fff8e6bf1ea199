//! Matchmaking: a single waiting slot.
//!
//! There is no rating or multi-queue; the first joiner waits, the second
//! is paired with it and the slot empties. Callers serialize access (the
//! registry lives behind one lock), so two joiners can never both be told
//! they are waiting.

use uttt_protocol::SessionId;

/// What happened when a session joined the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOutcome {
    /// The session now holds the waiting slot (or already did).
    Waiting,

    /// The session was paired. `x` is the one that was waiting.
    Paired { x: SessionId, o: SessionId },
}

/// Holds at most one session waiting for an opponent.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: Option<SessionId>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session. Pairs it with the waiting one if there is one.
    ///
    /// Re-enqueueing the session that already waits is a no-op that
    /// reports [`QueueOutcome::Waiting`] again.
    pub fn enqueue(&mut self, session_id: SessionId) -> QueueOutcome {
        match self.waiting {
            Some(waiting) if waiting == session_id => QueueOutcome::Waiting,
            Some(waiting) => {
                self.waiting = None;
                QueueOutcome::Paired {
                    x: waiting,
                    o: session_id,
                }
            }
            None => {
                self.waiting = Some(session_id);
                QueueOutcome::Waiting
            }
        }
    }

    /// Removes the session if it holds the waiting slot.
    /// Returns whether it did.
    pub fn remove(&mut self, session_id: SessionId) -> bool {
        if self.waiting == Some(session_id) {
            self.waiting = None;
            true
        } else {
            false
        }
    }

    /// The session currently waiting, if any.
    pub fn waiting(&self) -> Option<SessionId> {
        self.waiting
    }

    pub fn is_waiting(&self, session_id: SessionId) -> bool {
        self.waiting == Some(session_id)
    }
}
