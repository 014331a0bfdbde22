use crate::room::{PositionBounds, RoomError, RoomState};
use plaza_core::{Participant, Position, RoomConfig, SessionId, SpawnPolicy};
use rand::Rng;
use tracing::{debug, info};

/// Creates and destroys participant records as connections come and go.
pub struct Lifecycle {
    spawn: SpawnPolicy,
    bounds: PositionBounds,
}

impl Lifecycle {
    pub fn new(spawn: SpawnPolicy, bounds: PositionBounds) -> Self {
        Self { spawn, bounds }
    }

    pub fn from_config(config: &RoomConfig) -> Self {
        Self::new(config.spawn, PositionBounds::from_config(config))
    }

    pub fn spawn_position(&self) -> Position {
        let ground = Position::new(0.0, self.bounds.ground_y(), 0.0);
        match self.spawn {
            SpawnPolicy::Fixed(at) => self.bounds.clamp(at, ground),
            SpawnPolicy::Random => {
                let extent = self.bounds.half_extent();
                let mut rng = rand::thread_rng();
                Position::new(
                    rng.gen_range(-extent..=extent),
                    self.bounds.ground_y(),
                    rng.gen_range(-extent..=extent),
                )
            }
        }
    }

    /// Rejects a second join for an active session; the room stays as it was.
    pub fn on_join(
        &self,
        state: &mut RoomState,
        session_id: SessionId,
    ) -> Result<Participant, RoomError> {
        if state.contains(&session_id) {
            return Err(RoomError::DuplicateSession(session_id));
        }

        let participant = Participant::new(session_id, self.spawn_position());
        state.insert(participant.clone())?;

        info!(
            "Participant {} joined at {:?} ({} in room)",
            participant.session_id,
            participant.position,
            state.len()
        );
        Ok(participant)
    }

    /// Leaving twice, or leaving without ever joining, is a no-op.
    pub fn on_leave(&self, state: &mut RoomState, session_id: &SessionId) -> Option<Participant> {
        let Some(removed) = state.remove(session_id) else {
            debug!("Leave for absent session {}, ignoring", session_id);
            return None;
        };

        info!(
            "Participant {} left ({} in room)",
            session_id,
            state.len()
        );
        Some(removed)
    }
}
