//! Standard exit codes (BSD sysexits.h compatible)

/// Data format error (unreadable document, unknown item)
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
