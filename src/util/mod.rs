//! Utility helpers shared across the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `scheduler` isolates browser timers from the state machines; `youtube`
//! holds the video-id parser and player embed used by video screens.

pub mod scheduler;
pub mod youtube;
