use crate::room::RoomState;
use plaza_core::{Position, RoomConfig, SessionId};
use tracing::debug;

/// Clamp rule for every stored position: x and z share one symmetric bound,
/// y is pinned to the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionBounds {
    half_extent: f64,
    ground_y: f64,
}

impl PositionBounds {
    pub fn new(half_extent: f64, ground_y: f64) -> Self {
        Self {
            half_extent,
            ground_y,
        }
    }

    pub fn from_config(config: &RoomConfig) -> Self {
        Self::new(config.half_extent, config.ground_y)
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// NaN on an axis keeps `previous` for that axis; infinities clamp.
    pub fn clamp(&self, proposed: Position, previous: Position) -> Position {
        Position {
            x: self.clamp_axis(proposed.x, previous.x),
            y: self.ground_y,
            z: self.clamp_axis(proposed.z, previous.z),
        }
    }

    /// Clamps `proposed` and stores it for `session_id`. Returns the stored
    /// position, or `None` if the session is not in the room.
    pub fn apply(
        &self,
        state: &mut RoomState,
        session_id: &SessionId,
        proposed: Position,
    ) -> Option<Position> {
        let previous = state.get(session_id)?.position;
        let clamped = self.clamp(proposed, previous);

        if clamped != proposed {
            debug!(
                "Clamped position for {} from {:?} to {:?}",
                session_id, proposed, clamped
            );
        }

        state.set_position(session_id, clamped);
        Some(clamped)
    }

    fn clamp_axis(&self, value: f64, previous: f64) -> f64 {
        let value = if value.is_nan() { previous } else { value };
        value.clamp(-self.half_extent, self.half_extent)
    }
}

impl Default for PositionBounds {
    fn default() -> Self {
        Self::from_config(&RoomConfig::default())
    }
}
