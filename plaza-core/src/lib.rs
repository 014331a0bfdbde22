pub mod model;
pub mod traits;

mod error;

pub use error::ProtocolError;
pub use model::*;
pub use traits::WireMessage;
