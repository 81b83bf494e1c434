pub mod canonicalize;
pub mod classify;
pub mod hash;
pub mod key;
pub mod list;
pub mod log;
pub mod verify;
