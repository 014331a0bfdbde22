use plaza_core::{ServerMessage, SessionId};
use plaza_server::ClientOutput;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// ClientOutput that records every delivered frame. Sessions count as
/// connected until [`RecordingOutput::disconnect`] is called for them.
#[derive(Clone, Default)]
pub struct RecordingOutput {
    sent: Arc<Mutex<Vec<(SessionId, ServerMessage)>>>,
    disconnected: Arc<Mutex<HashSet<SessionId>>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disconnect(&self, session_id: &SessionId) {
        self.disconnected.lock().unwrap().insert(session_id.clone());
    }

    /// All frames delivered to `session_id`, in order.
    pub fn received_by(&self, session_id: &SessionId) -> Vec<ServerMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == session_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Frames to `session_id` and forgets them.
    pub fn take_for(&self, session_id: &SessionId) -> Vec<ServerMessage> {
        let mut sent = self.sent.lock().unwrap();
        let (taken, kept): (Vec<_>, Vec<_>) = sent.drain(..).partition(|(to, _)| to == session_id);
        *sent = kept;
        taken.into_iter().map(|(_, msg)| msg).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn total(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ClientOutput for RecordingOutput {
    fn deliver(&self, session_id: &SessionId, msg: ServerMessage) -> bool {
        tracing::debug!("[RecordingOutput] deliver to {}: {:?}", session_id, msg);

        if self.disconnected.lock().unwrap().contains(session_id) {
            return false;
        }
        self.sent.lock().unwrap().push((session_id.clone(), msg));
        true
    }
}
