pub use plaza_core::{ProtocolError, SessionId, WireMessage};

pub mod model {
    pub use plaza_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use plaza_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use plaza_client::*;
}
