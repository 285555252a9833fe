//! Networking modules for the screen and status-board channels.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines the channel contract the state machines consume,
//! `ws_transport` implements it over a browser WebSocket, and `types`
//! defines the wire payloads carried on both channels.

pub mod transport;
pub mod types;
pub mod ws_transport;
