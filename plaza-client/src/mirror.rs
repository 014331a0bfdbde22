use plaza_core::{DEFAULT_INTERPOLATION_FACTOR, Position, SessionId};
use std::collections::HashMap;

/// Local shadow of one participant. `target` is the last authoritative
/// position, `rendered` is what is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub target: Position,
    pub rendered: Position,
    pub is_self: bool,
}

/// Client-side copy of the room's players, fed by deltas and smoothed once
/// per render tick.
#[derive(Debug)]
pub struct ClientMirror {
    avatars: HashMap<SessionId, Avatar>,
    interpolation_factor: f64,
}

impl Default for ClientMirror {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPOLATION_FACTOR)
    }
}

impl ClientMirror {
    pub fn new(interpolation_factor: f64) -> Self {
        Self {
            avatars: HashMap::new(),
            interpolation_factor,
        }
    }

    pub fn set_interpolation_factor(&mut self, factor: f64) {
        self.interpolation_factor = factor;
    }

    pub fn interpolation_factor(&self) -> f64 {
        self.interpolation_factor
    }

    /// New avatars appear directly at their spawn point. Returns `false` if
    /// the session was already mirrored; only its target moves then.
    pub fn apply_added(&mut self, session_id: SessionId, position: Position, is_self: bool) -> bool {
        if let Some(existing) = self.avatars.get_mut(&session_id) {
            existing.target = position;
            return false;
        }
        self.avatars.insert(
            session_id,
            Avatar {
                target: position,
                rendered: position,
                is_self,
            },
        );
        true
    }

    /// Records a new target without moving the rendered position.
    pub fn apply_moved(&mut self, session_id: &SessionId, position: Position) -> bool {
        match self.avatars.get_mut(session_id) {
            Some(avatar) => {
                avatar.target = position;
                true
            }
            None => false,
        }
    }

    pub fn apply_removed(&mut self, session_id: &SessionId) -> Option<Avatar> {
        self.avatars.remove(session_id)
    }

    /// One render tick of exponential smoothing towards every target.
    pub fn tick(&mut self) {
        let t = self.interpolation_factor;
        for avatar in self.avatars.values_mut() {
            avatar.rendered = avatar.rendered.lerp(&avatar.target, t);
        }
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Avatar> {
        self.avatars.get(session_id)
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.avatars.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }

    pub fn local(&self) -> Option<(&SessionId, &Avatar)> {
        self.avatars.iter().find(|(_, avatar)| avatar.is_self)
    }

    pub fn avatars(&self) -> impl Iterator<Item = (&SessionId, &Avatar)> {
        self.avatars.iter()
    }

    pub fn clear(&mut self) {
        self.avatars.clear();
    }
}
