use crate::room::RoomError;
use plaza_core::{Participant, Position, SessionId};
use std::collections::BTreeMap;

/// A single mutation of the replicated players mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum StateDelta {
    Added(Participant),
    Changed(Participant),
    Removed(SessionId),
}

impl StateDelta {
    pub fn session_id(&self) -> &SessionId {
        match self {
            StateDelta::Added(p) | StateDelta::Changed(p) => &p.session_id,
            StateDelta::Removed(id) => id,
        }
    }
}

pub type Players = BTreeMap<SessionId, Participant>;

/// Reacts to every delta right after it has been applied. `players` is the
/// post-mutation view.
pub trait DeltaObserver: Send + 'static {
    fn on_delta(&mut self, delta: &StateDelta, players: &Players);
}

/// Authoritative mapping of session identity to participant. Only the room
/// loop holds it mutably; everybody else sees deltas.
#[derive(Default)]
pub struct RoomState {
    players: Players,
    observers: Vec<Box<dyn DeltaObserver>>,
}

impl RoomState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn DeltaObserver>) {
        self.observers.push(observer);
    }

    pub fn insert(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.players.contains_key(&participant.session_id) {
            return Err(RoomError::DuplicateSession(participant.session_id));
        }

        self.players
            .insert(participant.session_id.clone(), participant.clone());
        self.publish(StateDelta::Added(participant));
        Ok(())
    }

    /// Returns `false` when the session is not present.
    pub fn set_position(&mut self, session_id: &SessionId, position: Position) -> bool {
        let Some(participant) = self.players.get_mut(session_id) else {
            return false;
        };
        participant.position = position;

        let changed = participant.clone();
        self.publish(StateDelta::Changed(changed));
        true
    }

    pub fn remove(&mut self, session_id: &SessionId) -> Option<Participant> {
        let removed = self.players.remove(session_id)?;
        self.publish(StateDelta::Removed(session_id.clone()));
        Some(removed)
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Participant> {
        self.players.get(session_id)
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.players.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.players.values()
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.players.keys().cloned().collect()
    }

    fn publish(&mut self, delta: StateDelta) {
        let Self { players, observers } = self;
        for observer in observers.iter_mut() {
            observer.on_delta(&delta, players);
        }
    }
}
