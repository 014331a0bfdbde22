use crate::room::RoomError;
use plaza_core::{Participant, Position, SessionId, SignalEnvelope};
use tokio::sync::oneshot;

/// Commands the transport feeds into a room's event loop.
#[derive(Debug)]
pub enum RoomCommand {
    /// A freshly admitted connection. The reply tells the transport whether
    /// the session was accepted.
    Join {
        session_id: SessionId,
        reply: oneshot::Sender<Result<Participant, RoomError>>,
    },

    /// Explicit leave or a dropped connection; both are handled the same way.
    Leave { session_id: SessionId },

    UpdatePosition {
        session_id: SessionId,
        position: Position,
    },

    /// `from` is the sender's own session, never anything the client wrote.
    Signal {
        from: SessionId,
        envelope: SignalEnvelope,
    },

    Ping { session_id: SessionId, timestamp: u64 },

    Snapshot {
        reply: oneshot::Sender<Vec<Participant>>,
    },
}
