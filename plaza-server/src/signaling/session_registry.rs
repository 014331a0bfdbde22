use crate::signaling::ClientOutput;
use dashmap::DashMap;
use plaza_core::{ServerMessage, SessionId};
use tokio::sync::mpsc;
use tracing::error;

/// What a connection's writer task is asked to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Message(ServerMessage),
    /// Sends a close frame and stops the writer.
    Close { code: u16, reason: &'static str },
}

/// Per-session outbound queues for every live connection.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, mpsc::UnboundedSender<Outbound>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session_id: SessionId, tx: mpsc::UnboundedSender<Outbound>) {
        self.sessions.insert(session_id, tx);
    }

    pub fn unregister(&self, session_id: &SessionId) {
        self.sessions.remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn close(&self, session_id: &SessionId, code: u16, reason: &'static str) -> bool {
        self.push(session_id, Outbound::Close { code, reason })
    }

    fn push(&self, session_id: &SessionId, outbound: Outbound) -> bool {
        let Some(tx) = self.sessions.get(session_id) else {
            return false;
        };
        if let Err(e) = tx.send(outbound) {
            error!("Failed to queue frame for {}: {:?}", session_id, e.0);
            return false;
        }
        true
    }
}

impl ClientOutput for SessionRegistry {
    fn deliver(&self, session_id: &SessionId, msg: ServerMessage) -> bool {
        self.push(session_id, Outbound::Message(msg))
    }
}
