//! Marketplace backend access — HTTP client and wire types.

pub mod client;
pub mod types;
