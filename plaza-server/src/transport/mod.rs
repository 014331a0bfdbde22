mod close_code;
mod router;
mod ws_handler;

pub use close_code::*;
pub use router::*;
pub use ws_handler::*;
