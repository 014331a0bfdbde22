use crate::ProtocolError;
use crate::model::participant::Position;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HALF_EXTENT: f64 = 245.0;
pub const DEFAULT_AREA_SIZE: f64 = 500.0;
pub const DEFAULT_GROUND_Y: f64 = -1.0;
pub const DEFAULT_INTERPOLATION_FACTOR: f64 = 0.05;
pub const DEFAULT_KEYBOARD_SPEED: f64 = 5.0;
pub const DEFAULT_SECONDARY_SPEED: f64 = 3.0;
pub const DEFAULT_CAPACITY: usize = 10;

/// Where a freshly joined participant appears.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "at", rename_all = "camelCase")]
pub enum SpawnPolicy {
    /// Uniformly inside the clamp bounds.
    #[default]
    Random,
    Fixed(Position),
}

/// Room tunables. `Default` is the reference deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomConfig {
    /// Symmetric clamp bound applied to x and z.
    pub half_extent: f64,
    /// Side length of the visible play area.
    pub area_size: f64,
    /// Fixed vertical offset of every participant.
    pub ground_y: f64,
    /// Per-tick smoothing factor used by client mirrors.
    pub interpolation_factor: f64,
    pub keyboard_speed: f64,
    pub secondary_speed: f64,
    pub capacity: usize,
    pub spawn: SpawnPolicy,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            half_extent: DEFAULT_HALF_EXTENT,
            area_size: DEFAULT_AREA_SIZE,
            ground_y: DEFAULT_GROUND_Y,
            interpolation_factor: DEFAULT_INTERPOLATION_FACTOR,
            keyboard_speed: DEFAULT_KEYBOARD_SPEED,
            secondary_speed: DEFAULT_SECONDARY_SPEED,
            capacity: DEFAULT_CAPACITY,
            spawn: SpawnPolicy::default(),
        }
    }
}

impl RoomConfig {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(invalid(format!(
                "half extent must be positive, got {}",
                self.half_extent
            )));
        }
        if !self.area_size.is_finite() || self.area_size <= 0.0 {
            return Err(invalid(format!(
                "area size must be positive, got {}",
                self.area_size
            )));
        }
        if self.half_extent > self.area_size / 2.0 {
            return Err(invalid(format!(
                "half extent {} does not fit inside area size {}",
                self.half_extent, self.area_size
            )));
        }
        if !self.ground_y.is_finite() {
            return Err(invalid("ground offset must be finite".to_string()));
        }
        if !(self.interpolation_factor > 0.0 && self.interpolation_factor <= 1.0) {
            return Err(invalid(format!(
                "interpolation factor must be in (0, 1], got {}",
                self.interpolation_factor
            )));
        }
        for (name, speed) in [
            ("keyboard", self.keyboard_speed),
            ("secondary", self.secondary_speed),
        ] {
            if !speed.is_finite() || speed < 0.0 {
                return Err(invalid(format!("{name} speed must be non-negative")));
            }
        }
        if self.capacity == 0 {
            return Err(invalid("capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ProtocolError {
    ProtocolError::InvalidConfig(reason)
}
