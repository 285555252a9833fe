//! # screenlink
//!
//! WASM client that keeps a display screen connected to its controlling
//! server and mirrors connection liveness in the page.
//!
//! The crate holds two state machines (`state::connection` for a screen,
//! `state::status_board` for the operator dashboard), the leaf interfaces
//! they drive (transport, scheduler, UI projector, browser context), and the
//! browser implementations of those interfaces behind the `hydrate` feature.
//! Everything outside `hydrate` is plain Rust and runs under `cargo test`.

pub mod config;
pub mod error;
pub mod net;
#[cfg(feature = "hydrate")]
pub mod runtime;
pub mod state;
pub mod ui;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ClientError;
