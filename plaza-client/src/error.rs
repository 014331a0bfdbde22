use crate::negotiation::InvalidTransition;
use plaza_core::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Description exchange failed for one peer.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// Local capture could not be started.
    #[error("media unavailable: {0}")]
    Media(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}
