use crate::model::config::RoomConfig;
use crate::model::participant::Position;
use crate::model::session::SessionId;
use crate::model::signaling::{IceServerConfig, SignalEnvelope, SignalKind};
use crate::traits::WireMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a client sends to its room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    UpdatePosition(Position),
    Signal(SignalEnvelope),
    Leave,
    Ping { timestamp: u64 },
}

/// Frames a room sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Welcome {
        session_id: SessionId,
        config: RoomConfig,
        ice_servers: Vec<IceServerConfig>,
    },
    PlayerAdded {
        session_id: SessionId,
        position: Position,
        is_self: bool,
    },
    PlayerMoved {
        session_id: SessionId,
        position: Position,
    },
    PlayerRemoved {
        session_id: SessionId,
    },
    Signal {
        from: SessionId,
        #[serde(rename = "type")]
        kind: SignalKind,
        payload: Value,
    },
    Pong {
        timestamp: u64,
    },
}

impl WireMessage for ClientMessage {}

impl WireMessage for ServerMessage {}
