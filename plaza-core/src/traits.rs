use crate::ProtocolError;
use serde::{Serialize, de::DeserializeOwned};

/// A message that travels as a JSON text frame.
pub trait WireMessage: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }

    fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
