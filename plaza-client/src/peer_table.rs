use crate::backend::MediaPresentation;
use crate::negotiation::PeerNegotiation;
use plaza_core::SessionId;
use std::collections::HashMap;
use tracing::debug;

/// Result of tearing one peer down.
#[derive(Debug, Default)]
pub struct Teardown {
    pub negotiation: Option<PeerNegotiation>,
    pub media_disposed: bool,
}

impl Teardown {
    pub fn is_noop(&self) -> bool {
        self.negotiation.is_none() && !self.media_disposed
    }
}

/// Per-peer resources owned by one client session, keyed by the remote
/// session id.
#[derive(Default)]
pub struct PeerTable {
    negotiations: HashMap<SessionId, PeerNegotiation>,
    media: HashMap<SessionId, Box<dyn MediaPresentation>>,
}

impl PeerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing entry when one is already there.
    pub fn open(&mut self, local: &SessionId, remote: SessionId) -> &mut PeerNegotiation {
        self.negotiations
            .entry(remote.clone())
            .or_insert_with(|| PeerNegotiation::new(local, remote))
    }

    pub fn get(&self, remote: &SessionId) -> Option<&PeerNegotiation> {
        self.negotiations.get(remote)
    }

    pub fn get_mut(&mut self, remote: &SessionId) -> Option<&mut PeerNegotiation> {
        self.negotiations.get_mut(remote)
    }

    pub fn contains(&self, remote: &SessionId) -> bool {
        self.negotiations.contains_key(remote)
    }

    pub fn has_media(&self, remote: &SessionId) -> bool {
        self.media.contains_key(remote)
    }

    pub fn len(&self) -> usize {
        self.negotiations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.negotiations.is_empty()
    }

    pub fn remotes(&self) -> Vec<SessionId> {
        self.negotiations.keys().cloned().collect()
    }

    /// Media only attaches to peers with a negotiation handle. A previous
    /// presentation for the same peer is disposed.
    pub fn attach_media(
        &mut self,
        remote: SessionId,
        mut presentation: Box<dyn MediaPresentation>,
    ) -> bool {
        if !self.negotiations.contains_key(&remote) {
            debug!("Discarding media for unknown peer {}", remote);
            presentation.dispose();
            return false;
        }
        if let Some(mut old) = self.media.insert(remote, presentation) {
            old.dispose();
        }
        true
    }

    /// Removes both handles for `remote`. Each removal runs regardless of
    /// whether the other one found anything.
    pub fn teardown(&mut self, remote: &SessionId) -> Teardown {
        let negotiation = self.negotiations.remove(remote);

        let media_disposed = match self.media.remove(remote) {
            Some(mut presentation) => {
                presentation.dispose();
                true
            }
            None => false,
        };

        Teardown {
            negotiation,
            media_disposed,
        }
    }
}
