use crate::ClientError;
use async_trait::async_trait;
use plaza_core::{SessionId, SignalKind};
use serde_json::Value;

/// The media stack a [`crate::ClientSession`] drives: one negotiation handle
/// per remote session plus local capture. Payloads are opaque to this crate.
#[async_trait]
pub trait NegotiationBackend: Send + Sync {
    /// Starts local capture. Failure leaves the session usable without an
    /// outbound stream.
    async fn start_local_media(&self) -> Result<(), ClientError>;

    async fn stop_local_media(&self);

    /// Creates the local offer for `remote` and installs it as the local
    /// description.
    async fn create_offer(&self, remote: &SessionId) -> Result<Value, ClientError>;

    /// Installs a remote offer or answer.
    async fn set_remote_description(
        &self,
        remote: &SessionId,
        kind: SignalKind,
        description: Value,
    ) -> Result<(), ClientError>;

    /// Only valid after a remote offer has been installed.
    async fn create_answer(&self, remote: &SessionId) -> Result<Value, ClientError>;

    async fn add_candidate(&self, remote: &SessionId, candidate: Value) -> Result<(), ClientError>;

    /// Closes the handle for `remote`. Must tolerate unknown sessions.
    async fn close(&self, remote: &SessionId);
}

/// Something that shows a remote participant's media, e.g. a video surface.
pub trait MediaPresentation: Send {
    fn dispose(&mut self);
}
