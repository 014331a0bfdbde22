use plaza_core::{ServerMessage, SessionId};

/// Whatever owns the client connections implements this so a room can push
/// frames to individual sessions.
pub trait ClientOutput: Send + Sync {
    /// Queues `msg` for `session_id`. Returns `false` when that session has
    /// no live connection; the frame is dropped.
    fn deliver(&self, session_id: &SessionId, msg: ServerMessage) -> bool;
}
