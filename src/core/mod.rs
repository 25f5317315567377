//! Viewport interaction core – scroll hysteresis, chrome transition, and
//! carousel page synchronization.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Everything is synchronous and safe to call on every event sample.

pub mod chrome;
pub mod pager;
pub mod scroll;

