use crate::room::{Room, RoomHandle};
use crate::signaling::SessionRegistry;
use plaza_core::{IceServerConfig, ProtocolError, RoomConfig, ServerMessage, SessionId};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

struct SignalingInner {
    registry: Arc<SessionRegistry>,
    config: RoomConfig,
    ice_servers: Vec<IceServerConfig>,
    admission: Arc<Semaphore>,
}

/// Shared state of the WebSocket front: the connection table, the room it
/// feeds and the admission gate.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    room: RoomHandle,
}

impl SignalingService {
    pub fn new(
        config: RoomConfig,
        ice_servers: Vec<IceServerConfig>,
        registry: Arc<SessionRegistry>,
        room: RoomHandle,
    ) -> Self {
        let admission = Arc::new(Semaphore::new(config.capacity));
        Self {
            inner: Arc::new(SignalingInner {
                registry,
                config,
                ice_servers,
                admission,
            }),
            room,
        }
    }

    /// Spawns the room on the current runtime and wires it to a fresh
    /// registry. Invalid tunables are refused before anything starts.
    pub fn start(
        config: RoomConfig,
        ice_servers: Vec<IceServerConfig>,
    ) -> Result<Self, ProtocolError> {
        let registry = Arc::new(SessionRegistry::new());
        let room = Room::spawn(&config, registry.clone())?;
        Ok(Self::new(config, ice_servers, registry, room))
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.inner.registry
    }

    pub fn room(&self) -> &RoomHandle {
        &self.room
    }

    pub fn config(&self) -> &RoomConfig {
        &self.inner.config
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    /// Takes one of the `capacity` seats. The seat is released when the
    /// permit is dropped.
    pub fn try_admit(&self) -> Option<OwnedSemaphorePermit> {
        self.inner.admission.clone().try_acquire_owned().ok()
    }

    pub fn available_seats(&self) -> usize {
        self.inner.admission.available_permits()
    }

    pub fn welcome(&self, session_id: SessionId) -> ServerMessage {
        ServerMessage::Welcome {
            session_id,
            config: self.inner.config.clone(),
            ice_servers: self.get_ice_servers(),
        }
    }
}
