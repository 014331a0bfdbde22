use crate::room::{RoomCommand, RoomError};
use plaza_core::{Participant, Position, SessionId, SignalEnvelope};
use tokio::sync::{mpsc, oneshot};

/// Cloneable sending side of a room's command channel.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    tx: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn new(tx: mpsc::Sender<RoomCommand>) -> Self {
        Self { tx }
    }

    pub async fn join(&self, session_id: SessionId) -> Result<Participant, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Join { session_id, reply }).await?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    pub async fn leave(&self, session_id: SessionId) -> Result<(), RoomError> {
        self.send(RoomCommand::Leave { session_id }).await
    }

    pub async fn update_position(
        &self,
        session_id: SessionId,
        position: Position,
    ) -> Result<(), RoomError> {
        self.send(RoomCommand::UpdatePosition {
            session_id,
            position,
        })
        .await
    }

    pub async fn signal(&self, from: SessionId, envelope: SignalEnvelope) -> Result<(), RoomError> {
        self.send(RoomCommand::Signal { from, envelope }).await
    }

    pub async fn ping(&self, session_id: SessionId, timestamp: u64) -> Result<(), RoomError> {
        self.send(RoomCommand::Ping {
            session_id,
            timestamp,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<Vec<Participant>, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| RoomError::RoomClosed)
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.tx.send(cmd).await.map_err(|_| RoomError::RoomClosed)
    }
}
