use crate::room::{
    DeltaBroadcaster, Lifecycle, PositionBounds, RoomCommand, RoomHandle, RoomState,
};
use crate::signaling::{ClientOutput, SignalRelay};
use plaza_core::{ProtocolError, RoomConfig, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 256;

/// One room process. All commands run one at a time, in arrival order, on
/// the task that drives [`Room::run`].
pub struct Room {
    state: RoomState,
    lifecycle: Lifecycle,
    bounds: PositionBounds,
    relay: SignalRelay,
    output: Arc<dyn ClientOutput>,
    command_rx: mpsc::Receiver<RoomCommand>,
}

impl Room {
    /// Fails if `config` does not pass [`RoomConfig::validate`]; clamping
    /// and spawning rely on sane bounds.
    pub fn new(
        config: &RoomConfig,
        command_rx: mpsc::Receiver<RoomCommand>,
        output: Arc<dyn ClientOutput>,
    ) -> Result<Self, ProtocolError> {
        config.validate()?;

        let mut state = RoomState::new();
        state.subscribe(Box::new(DeltaBroadcaster::new(output.clone())));

        Ok(Self {
            state,
            lifecycle: Lifecycle::from_config(config),
            bounds: PositionBounds::from_config(config),
            relay: SignalRelay::new(output.clone()),
            output,
            command_rx,
        })
    }

    /// Builds a room and starts its loop on the current runtime.
    pub fn spawn(
        config: &RoomConfig,
        output: Arc<dyn ClientOutput>,
    ) -> Result<RoomHandle, ProtocolError> {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let room = Room::new(config, rx, output)?;
        tokio::spawn(room.run());
        Ok(RoomHandle::new(tx))
    }

    pub async fn run(mut self) {
        info!("Room event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Room event loop finished");
    }

    pub fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { session_id, reply } => {
                let result = self.lifecycle.on_join(&mut self.state, session_id);
                if let Err(e) = &result {
                    info!("Join rejected: {}", e);
                }
                let _ = reply.send(result);
            }

            RoomCommand::Leave { session_id } => {
                self.lifecycle.on_leave(&mut self.state, &session_id);
            }

            RoomCommand::UpdatePosition {
                session_id,
                position,
            } => {
                if self
                    .bounds
                    .apply(&mut self.state, &session_id, position)
                    .is_none()
                {
                    debug!("Position update from absent session {}", session_id);
                }
            }

            RoomCommand::Signal { from, envelope } => {
                self.relay.forward(&self.state, &from, envelope);
            }

            RoomCommand::Ping {
                session_id,
                timestamp,
            } => {
                self.output
                    .deliver(&session_id, ServerMessage::Pong { timestamp });
            }

            RoomCommand::Snapshot { reply } => {
                let _ = reply.send(self.state.participants().cloned().collect());
            }
        }
    }
}
