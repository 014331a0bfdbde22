use plaza_core::SessionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// A second join for a session that is still active. Points at a
    /// transport bug, so the existing participant is left untouched.
    #[error("session {0} is already in the room")]
    DuplicateSession(SessionId),

    #[error("room event loop is no longer running")]
    RoomClosed,
}
