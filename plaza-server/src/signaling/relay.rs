use crate::room::RoomState;
use crate::signaling::ClientOutput;
use plaza_core::{ServerMessage, SessionId, SignalEnvelope};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// The sender is not (or no longer) a participant.
    SenderAbsent,
    /// Nobody with that session id is in the room.
    TargetAbsent,
    /// The target is in the room but its connection already went away.
    TargetUnreachable,
}

/// Store-and-forward router for negotiation messages. Reads only the
/// addressing; payloads pass through untouched.
pub struct SignalRelay {
    output: Arc<dyn ClientOutput>,
}

impl SignalRelay {
    pub fn new(output: Arc<dyn ClientOutput>) -> Self {
        Self { output }
    }

    pub fn forward(
        &self,
        state: &RoomState,
        from: &SessionId,
        envelope: SignalEnvelope,
    ) -> RelayOutcome {
        if !state.contains(from) {
            debug!("Dropping {:?} signal from absent session {}", envelope.kind, from);
            return RelayOutcome::SenderAbsent;
        }

        if !state.contains(&envelope.to) {
            debug!(
                "Dropping {:?} signal from {} to absent session {}",
                envelope.kind, from, envelope.to
            );
            return RelayOutcome::TargetAbsent;
        }

        let SignalEnvelope { to, kind, payload } = envelope;
        let msg = ServerMessage::Signal {
            from: from.clone(),
            kind,
            payload,
        };

        if self.output.deliver(&to, msg) {
            debug!("Relayed {:?} signal {} -> {}", kind, from, to);
            RelayOutcome::Delivered
        } else {
            warn!("Signal target {} has no live connection", to);
            RelayOutcome::TargetUnreachable
        }
    }
}
