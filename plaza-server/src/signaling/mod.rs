mod client_output;
mod relay;
mod session_registry;
mod signaling_service;

pub use client_output::*;
pub use relay::*;
pub use session_registry::*;
pub use signaling_service::*;
