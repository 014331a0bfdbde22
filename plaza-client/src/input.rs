use plaza_core::{Position, RoomConfig};

/// What the host device offers, detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    pub keyboard: bool,
    pub touch: bool,
    pub xr: bool,
}

impl DeviceProfile {
    pub fn desktop() -> Self {
        Self {
            keyboard: true,
            ..Self::default()
        }
    }

    pub fn mobile() -> Self {
        Self {
            touch: true,
            ..Self::default()
        }
    }

    pub fn headset() -> Self {
        Self {
            xr: true,
            ..Self::default()
        }
    }
}

/// Movement request for one input tick; both axes are in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    pub forward: f64,
    pub strafe: f64,
}

impl MoveIntent {
    pub fn new(forward: f64, strafe: f64) -> Self {
        Self { forward, strafe }
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0
    }
}

/// How continuous input becomes movement. Chosen once from a
/// [`DeviceProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputStrategy {
    Keyboard { speed: f64 },
    /// Touch joystick or XR controller.
    Secondary { speed: f64 },
}

impl InputStrategy {
    pub fn select(profile: DeviceProfile, config: &RoomConfig) -> Self {
        if profile.xr || (profile.touch && !profile.keyboard) {
            InputStrategy::Secondary {
                speed: config.secondary_speed,
            }
        } else {
            InputStrategy::Keyboard {
                speed: config.keyboard_speed,
            }
        }
    }

    pub fn speed(&self) -> f64 {
        match self {
            InputStrategy::Keyboard { speed } | InputStrategy::Secondary { speed } => *speed,
        }
    }

    /// Next position to request. Forward is towards negative z. Height is
    /// left alone since the room pins it anyway.
    pub fn step(&self, from: Position, intent: MoveIntent) -> Position {
        let speed = self.speed();
        let forward = sanitize(intent.forward);
        let strafe = sanitize(intent.strafe);

        Position {
            x: from.x + strafe * speed,
            y: from.y,
            z: from.z - forward * speed,
        }
    }
}

fn sanitize(axis: f64) -> f64 {
    if axis.is_nan() {
        0.0
    } else {
        axis.clamp(-1.0, 1.0)
    }
}
