use crate::backend::{MediaPresentation, NegotiationBackend};
use crate::input::{DeviceProfile, InputStrategy, MoveIntent};
use crate::mirror::ClientMirror;
use crate::negotiation::NegotiationState;
use crate::peer_table::PeerTable;
use crate::ClientError;
use plaza_core::{
    ClientMessage, IceServerConfig, Position, RoomConfig, ServerMessage, SessionId, SignalEnvelope,
    SignalKind,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// State of the local outbound stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalMedia {
    Off,
    Live,
    /// Capture was refused; the session goes on without it.
    Unavailable,
}

/// One client's view of the room: mirror, peer table and input handling,
/// all owned here and driven one event at a time.
pub struct ClientSession {
    local: Option<SessionId>,
    config: RoomConfig,
    ice_servers: Vec<IceServerConfig>,
    profile: DeviceProfile,
    input: InputStrategy,
    mirror: ClientMirror,
    peers: PeerTable,
    backend: Arc<dyn NegotiationBackend>,
    outbound: mpsc::UnboundedSender<ClientMessage>,
    local_media: LocalMedia,
}

impl ClientSession {
    pub fn new(
        backend: Arc<dyn NegotiationBackend>,
        outbound: mpsc::UnboundedSender<ClientMessage>,
        profile: DeviceProfile,
    ) -> Self {
        let config = RoomConfig::default();
        Self {
            local: None,
            input: InputStrategy::select(profile, &config),
            mirror: ClientMirror::new(config.interpolation_factor),
            config,
            ice_servers: Vec::new(),
            profile,
            peers: PeerTable::new(),
            backend,
            outbound,
            local_media: LocalMedia::Off,
        }
    }

    pub fn local_id(&self) -> Option<&SessionId> {
        self.local.as_ref()
    }

    pub fn mirror(&self) -> &ClientMirror {
        &self.mirror
    }

    pub fn peers(&self) -> &PeerTable {
        &self.peers
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn ice_servers(&self) -> &[IceServerConfig] {
        &self.ice_servers
    }

    pub fn input(&self) -> InputStrategy {
        self.input
    }

    pub fn local_media(&self) -> LocalMedia {
        self.local_media
    }

    pub fn negotiation_state(&self, remote: &SessionId) -> Option<NegotiationState> {
        self.peers.get(remote).map(|n| n.state())
    }

    /// Applies one frame from the room. Only a dead outbound channel is
    /// reported; every per-peer failure is absorbed.
    pub async fn handle(&mut self, msg: ServerMessage) -> Result<(), ClientError> {
        match msg {
            ServerMessage::Welcome {
                session_id,
                config,
                ice_servers,
            } => {
                info!("Welcome as {}", session_id);
                self.local = Some(session_id);
                self.input = InputStrategy::select(self.profile, &config);
                self.mirror.set_interpolation_factor(config.interpolation_factor);
                self.config = config;
                self.ice_servers = ice_servers;
                self.start_local_media().await;
                self.open_pending_peers().await
            }

            ServerMessage::PlayerAdded {
                session_id,
                position,
                is_self,
            } => self.on_player_added(session_id, position, is_self).await,

            ServerMessage::PlayerMoved {
                session_id,
                position,
            } => {
                if !self.mirror.apply_moved(&session_id, position) {
                    debug!("Move for unknown participant {}", session_id);
                }
                Ok(())
            }

            ServerMessage::PlayerRemoved { session_id } => {
                self.remove_peer(&session_id).await;
                Ok(())
            }

            ServerMessage::Signal {
                from,
                kind,
                payload,
            } => self.on_signal(from, kind, payload).await,

            ServerMessage::Pong { timestamp } => {
                debug!("Pong {}", timestamp);
                Ok(())
            }
        }
    }

    /// Render tick.
    pub fn tick(&mut self) {
        self.mirror.tick();
    }

    /// Negotiation-needed trigger for `remote`. Skipped while an offer for
    /// the same peer is already in flight; whatever the backend returns, the
    /// peer leaves the `Offering` state before this returns.
    pub async fn negotiation_needed(&mut self, remote: &SessionId) -> Result<(), ClientError> {
        let Some(negotiation) = self.peers.get_mut(remote) else {
            debug!("Negotiation needed for unknown peer {}", remote);
            return Ok(());
        };
        if !negotiation.try_begin_offer() {
            debug!("Negotiation with {} already in flight", remote);
            return Ok(());
        }

        let offer = self.backend.create_offer(remote).await;

        let Some(negotiation) = self.peers.get_mut(remote) else {
            return Ok(());
        };
        match offer {
            Ok(payload) => {
                negotiation.offer_sent()?;
                self.send_signal(remote.clone(), SignalKind::Offer, payload)
            }
            Err(e) => {
                warn!("Offer to {} failed: {}", remote, e);
                negotiation.fail();
                Ok(())
            }
        }
    }

    /// Forwards a locally gathered candidate. Dropped when the peer has no
    /// negotiation handle.
    pub fn send_local_candidate(
        &self,
        remote: &SessionId,
        candidate: Value,
    ) -> Result<(), ClientError> {
        if !self.peers.contains(remote) {
            debug!("Dropping local candidate for unknown peer {}", remote);
            return Ok(());
        }
        self.send_signal(remote.clone(), SignalKind::Candidate, candidate)
    }

    /// Hands a remote media presentation to the peer table.
    pub fn attach_media(
        &mut self,
        remote: SessionId,
        presentation: Box<dyn MediaPresentation>,
    ) -> bool {
        self.peers.attach_media(remote, presentation)
    }

    /// Requests a move for the local participant. Returns the requested
    /// position, or `None` before the local avatar exists or when idle.
    pub fn step_input(&mut self, intent: MoveIntent) -> Result<Option<Position>, ClientError> {
        if intent.is_idle() {
            return Ok(None);
        }
        let Some(from) = self.mirror.local().map(|(_, avatar)| avatar.target) else {
            return Ok(None);
        };

        let next = self.input.step(from, intent);
        self.send(ClientMessage::UpdatePosition(next))?;
        Ok(Some(next))
    }

    pub fn ping(&self, timestamp: u64) -> Result<(), ClientError> {
        self.send(ClientMessage::Ping { timestamp })
    }

    /// Stops capture, tears down every peer and tells the room. Returns the
    /// number of peers that were torn down.
    pub async fn leave(&mut self) -> Result<usize, ClientError> {
        if self.local_media == LocalMedia::Live {
            self.backend.stop_local_media().await;
        }
        self.local_media = LocalMedia::Off;

        let remotes = self.peers.remotes();
        for remote in &remotes {
            self.remove_peer(remote).await;
        }
        self.mirror.clear();

        let sent = self.send(ClientMessage::Leave);
        self.local = None;
        sent.map(|_| remotes.len())
    }

    async fn start_local_media(&mut self) {
        self.local_media = match self.backend.start_local_media().await {
            Ok(()) => LocalMedia::Live,
            Err(e) => {
                warn!("Local media unavailable, continuing without it: {}", e);
                LocalMedia::Unavailable
            }
        };
    }

    async fn on_player_added(
        &mut self,
        session_id: SessionId,
        position: Position,
        is_self: bool,
    ) -> Result<(), ClientError> {
        self.mirror.apply_added(session_id.clone(), position, is_self);

        if is_self {
            return Ok(());
        }
        let Some(local) = self.local.clone() else {
            debug!("Participant {} added before welcome, negotiation deferred", session_id);
            return Ok(());
        };

        self.open_peer(&local, session_id).await
    }

    async fn open_peer(&mut self, local: &SessionId, remote: SessionId) -> Result<(), ClientError> {
        let initiator = self.peers.open(local, remote.clone()).is_initiator();
        if initiator {
            self.negotiation_needed(&remote).await?;
        }
        Ok(())
    }

    /// Remotes mirrored before the welcome arrived get their handles now.
    async fn open_pending_peers(&mut self) -> Result<(), ClientError> {
        let Some(local) = self.local.clone() else {
            return Ok(());
        };
        let pending: Vec<SessionId> = self
            .mirror
            .avatars()
            .filter(|(id, avatar)| {
                !avatar.is_self && **id != local && !self.peers.contains(id)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for remote in pending {
            debug!("Opening negotiation with {} mirrored before welcome", remote);
            self.open_peer(&local, remote).await?;
        }
        Ok(())
    }

    /// Tears down the avatar, the negotiation handle and the media
    /// presentation. A missing one never stops the others.
    async fn remove_peer(&mut self, remote: &SessionId) {
        let avatar = self.mirror.apply_removed(remote);
        let teardown = self.peers.teardown(remote);

        if teardown.negotiation.is_some() {
            self.backend.close(remote).await;
        }

        if avatar.is_none() && teardown.is_noop() {
            debug!("Removal for absent peer {}", remote);
        } else {
            info!("Peer {} removed", remote);
        }
    }

    async fn on_signal(
        &mut self,
        from: SessionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<(), ClientError> {
        if !self.peers.contains(&from) {
            debug!("Dropping {:?} from {} without negotiation handle", kind, from);
            return Ok(());
        }

        match kind {
            SignalKind::Offer => self.on_remote_offer(&from, payload).await,
            SignalKind::Answer => {
                self.on_remote_answer(&from, payload).await;
                Ok(())
            }
            SignalKind::Candidate => {
                self.on_remote_candidate(&from, payload).await;
                Ok(())
            }
        }
    }

    async fn on_remote_offer(&mut self, from: &SessionId, offer: Value) -> Result<(), ClientError> {
        let accepts = self
            .peers
            .get(from)
            .is_some_and(|n| n.accepts_remote_offer());
        if !accepts {
            debug!("Ignoring colliding offer from {}", from);
            return Ok(());
        }

        // The answer is only created once the remote description is in.
        if let Err(e) = self
            .backend
            .set_remote_description(from, SignalKind::Offer, offer)
            .await
        {
            warn!("Remote offer from {} rejected: {}", from, e);
            self.fail_peer(from);
            return Ok(());
        }
        if let Some(negotiation) = self.peers.get_mut(from) {
            negotiation.remote_description_set();
        }
        self.flush_candidates(from).await;

        match self.backend.create_answer(from).await {
            Ok(answer) => {
                if let Some(negotiation) = self.peers.get_mut(from) {
                    negotiation.offer_answered()?;
                }
                self.send_signal(from.clone(), SignalKind::Answer, answer)
            }
            Err(e) => {
                warn!("Answer for {} failed: {}", from, e);
                self.fail_peer(from);
                Ok(())
            }
        }
    }

    async fn on_remote_answer(&mut self, from: &SessionId, answer: Value) {
        let awaiting = self
            .peers
            .get(from)
            .is_some_and(|n| n.state() == NegotiationState::AwaitingAnswer);
        if !awaiting {
            debug!("Ignoring unexpected answer from {}", from);
            return;
        }

        match self
            .backend
            .set_remote_description(from, SignalKind::Answer, answer)
            .await
        {
            Ok(()) => {
                if let Some(negotiation) = self.peers.get_mut(from) {
                    let _ = negotiation.answer_applied();
                }
                self.flush_candidates(from).await;
            }
            Err(e) => {
                warn!("Remote answer from {} rejected: {}", from, e);
                self.fail_peer(from);
            }
        }
    }

    async fn on_remote_candidate(&mut self, from: &SessionId, candidate: Value) {
        let Some(negotiation) = self.peers.get_mut(from) else {
            return;
        };
        if !negotiation.has_remote_description() {
            negotiation.buffer_candidate(candidate);
            return;
        }
        if let Err(e) = self.backend.add_candidate(from, candidate).await {
            warn!("Candidate from {} ignored: {}", from, e);
        }
    }

    async fn flush_candidates(&mut self, from: &SessionId) {
        let pending = match self.peers.get_mut(from) {
            Some(negotiation) => negotiation.take_pending_candidates(),
            None => return,
        };
        for candidate in pending {
            if let Err(e) = self.backend.add_candidate(from, candidate).await {
                warn!("Buffered candidate from {} ignored: {}", from, e);
            }
        }
    }

    fn fail_peer(&mut self, remote: &SessionId) {
        if let Some(negotiation) = self.peers.get_mut(remote) {
            negotiation.fail();
        }
    }

    fn send_signal(
        &self,
        to: SessionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<(), ClientError> {
        self.send(ClientMessage::Signal(SignalEnvelope { to, kind, payload }))
    }

    fn send(&self, msg: ClientMessage) -> Result<(), ClientError> {
        self.outbound
            .send(msg)
            .map_err(|_| ClientError::Transport("outbound channel closed".to_string()))
    }
}
