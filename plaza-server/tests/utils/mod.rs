pub mod recording_output;

pub use recording_output::*;
pub use room_helpers::*;
pub use ws_client::*;
