/// Sent after the client asked to leave.
pub const CLOSE_NORMAL: u16 = 1000;

/// The room loop died underneath the connection.
pub const CLOSE_INTERNAL_ERROR: u16 = 1011;

/// No free seat at admission time.
pub const CLOSE_ROOM_FULL: u16 = 4001;

/// The room already holds this session id.
pub const CLOSE_DUPLICATE_SESSION: u16 = 4002;
