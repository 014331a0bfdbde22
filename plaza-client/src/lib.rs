mod backend;
mod connection;
mod error;
mod input;
mod mirror;
mod negotiation;
mod peer_table;
mod session;

pub use backend::{MediaPresentation, NegotiationBackend};
pub use connection::{ConnectionEvent, connect};
pub use error::ClientError;
pub use input::{DeviceProfile, InputStrategy, MoveIntent};
pub use mirror::{Avatar, ClientMirror};
pub use negotiation::{
    InvalidTransition, MAX_PENDING_CANDIDATES, NegotiationState, PeerNegotiation, should_initiate,
};
pub use peer_table::{PeerTable, Teardown};
pub use session::{ClientSession, LocalMedia};
