mod config;
mod message;
mod participant;
mod session;
mod signaling;

pub use config::{
    DEFAULT_AREA_SIZE, DEFAULT_CAPACITY, DEFAULT_GROUND_Y, DEFAULT_HALF_EXTENT,
    DEFAULT_INTERPOLATION_FACTOR, DEFAULT_KEYBOARD_SPEED, DEFAULT_SECONDARY_SPEED, RoomConfig,
    SpawnPolicy,
};
pub use message::{ClientMessage, ServerMessage};
pub use participant::{Participant, Position};
pub use session::SessionId;
pub use signaling::{IceServerConfig, SignalEnvelope, SignalKind};
