use crate::model::session::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Moves `t` of the way from `self` towards `target` on every axis.
    pub fn lerp(&self, target: &Position, t: f64) -> Position {
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub session_id: SessionId,
    pub position: Position,
}

impl Participant {
    pub fn new(session_id: SessionId, position: Position) -> Self {
        Self {
            session_id,
            position,
        }
    }
}
