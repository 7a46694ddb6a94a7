//! API module

mod client;

pub use client::*;
