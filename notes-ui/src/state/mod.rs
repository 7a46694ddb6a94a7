//! Application state

pub mod global;
pub mod session;
