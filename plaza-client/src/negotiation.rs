use plaza_core::SessionId;
use serde_json::Value;
use std::collections::VecDeque;
use thiserror::Error;

/// Candidates kept per peer while no remote description is installed.
pub const MAX_PENDING_CANDIDATES: usize = 64;

/// Exactly one side of a pair sends the initial offer: the one with the
/// greater session id.
pub fn should_initiate(local: &SessionId, remote: &SessionId) -> bool {
    local > remote
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    /// Local offer is being created.
    Offering,
    /// Offer sent, waiting for the remote answer.
    AwaitingAnswer,
    Stable,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid negotiation transition from {from:?} on {event}")]
pub struct InvalidTransition {
    pub from: NegotiationState,
    pub event: &'static str,
}

/// Negotiation bookkeeping for one remote peer.
#[derive(Debug)]
pub struct PeerNegotiation {
    remote: SessionId,
    state: NegotiationState,
    initiator: bool,
    has_remote_description: bool,
    pending_candidates: VecDeque<Value>,
}

impl PeerNegotiation {
    pub fn new(local: &SessionId, remote: SessionId) -> Self {
        let initiator = should_initiate(local, &remote);
        Self {
            remote,
            state: NegotiationState::Idle,
            initiator,
            has_remote_description: false,
            pending_candidates: VecDeque::new(),
        }
    }

    pub fn remote(&self) -> &SessionId {
        &self.remote
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn is_initiator(&self) -> bool {
        self.initiator
    }

    pub fn is_negotiating(&self) -> bool {
        matches!(
            self.state,
            NegotiationState::Offering | NegotiationState::AwaitingAnswer
        )
    }

    pub fn has_remote_description(&self) -> bool {
        self.has_remote_description
    }

    /// Guard for re-entrant negotiation-needed triggers. Returns `false` and
    /// leaves the state alone while an offer is already in flight.
    pub fn try_begin_offer(&mut self) -> bool {
        if self.is_negotiating() {
            return false;
        }
        self.state = NegotiationState::Offering;
        true
    }

    pub fn offer_sent(&mut self) -> Result<(), InvalidTransition> {
        self.transition(NegotiationState::Offering, NegotiationState::AwaitingAnswer, "offer_sent")
    }

    pub fn answer_applied(&mut self) -> Result<(), InvalidTransition> {
        self.transition(NegotiationState::AwaitingAnswer, NegotiationState::Stable, "answer_applied")?;
        self.has_remote_description = true;
        Ok(())
    }

    /// Whether an incoming offer should be answered. On collision the
    /// initiator keeps its own offer and the other side yields.
    pub fn accepts_remote_offer(&self) -> bool {
        !(self.is_negotiating() && self.initiator)
    }

    /// Remote offer installed and answer sent.
    pub fn offer_answered(&mut self) -> Result<(), InvalidTransition> {
        if self.is_negotiating() && self.initiator {
            return Err(InvalidTransition {
                from: self.state,
                event: "offer_answered",
            });
        }
        self.state = NegotiationState::Stable;
        self.has_remote_description = true;
        Ok(())
    }

    /// Marks the remote description as installed before the answer exists,
    /// so candidates stop being buffered.
    pub fn remote_description_set(&mut self) {
        self.has_remote_description = true;
    }

    pub fn fail(&mut self) {
        self.state = NegotiationState::Failed;
    }

    /// Buffers a candidate that arrived ahead of its description. The
    /// oldest entry is dropped once the buffer is full.
    pub fn buffer_candidate(&mut self, candidate: Value) {
        if self.pending_candidates.len() == MAX_PENDING_CANDIDATES {
            self.pending_candidates.pop_front();
        }
        self.pending_candidates.push_back(candidate);
    }

    pub fn take_pending_candidates(&mut self) -> Vec<Value> {
        self.pending_candidates.drain(..).collect()
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    fn transition(
        &mut self,
        from: NegotiationState,
        to: NegotiationState,
        event: &'static str,
    ) -> Result<(), InvalidTransition> {
        if self.state != from {
            return Err(InvalidTransition {
                from: self.state,
                event,
            });
        }
        self.state = to;
        Ok(())
    }
}
