mod broadcast;
mod lifecycle;
mod position;
mod room;
mod room_command;
mod room_error;
mod room_handle;
mod room_state;

pub use broadcast::*;
pub use lifecycle::*;
pub use position::*;
pub use room::*;
pub use room_command::*;
pub use room_error::*;
pub use room_handle::*;
pub use room_state::*;
