use crate::room::{DeltaObserver, Players, StateDelta};
use crate::signaling::ClientOutput;
use plaza_core::{Participant, ServerMessage, SessionId};
use std::sync::Arc;
use tracing::debug;

/// Turns every state delta into per-recipient frames for all sessions in the
/// room.
pub struct DeltaBroadcaster {
    output: Arc<dyn ClientOutput>,
}

impl DeltaBroadcaster {
    pub fn new(output: Arc<dyn ClientOutput>) -> Self {
        Self { output }
    }

    fn send(&self, to: &SessionId, msg: ServerMessage) {
        if !self.output.deliver(to, msg) {
            debug!("Delta for {} not delivered, connection is gone", to);
        }
    }

    fn added(&self, joined: &Participant, players: &Players) {
        // The joiner learns about everybody already present before its own add.
        for existing in players.values() {
            if existing.session_id == joined.session_id {
                continue;
            }
            self.send(
                &joined.session_id,
                ServerMessage::PlayerAdded {
                    session_id: existing.session_id.clone(),
                    position: existing.position,
                    is_self: false,
                },
            );
        }

        for recipient in players.keys() {
            self.send(
                recipient,
                ServerMessage::PlayerAdded {
                    session_id: joined.session_id.clone(),
                    position: joined.position,
                    is_self: *recipient == joined.session_id,
                },
            );
        }
    }
}

impl DeltaObserver for DeltaBroadcaster {
    fn on_delta(&mut self, delta: &StateDelta, players: &Players) {
        match delta {
            StateDelta::Added(joined) => self.added(joined, players),

            StateDelta::Changed(moved) => {
                for recipient in players.keys() {
                    self.send(
                        recipient,
                        ServerMessage::PlayerMoved {
                            session_id: moved.session_id.clone(),
                            position: moved.position,
                        },
                    );
                }
            }

            StateDelta::Removed(left) => {
                for recipient in players.keys() {
                    self.send(
                        recipient,
                        ServerMessage::PlayerRemoved {
                            session_id: left.clone(),
                        },
                    );
                }
            }
        }
    }
}
