//! Client state machines.
//!
//! SYSTEM CONTEXT
//! ==============
//! `connection` drives a screen page, `status_board` drives the operator
//! dashboard, and `content_window` is the screen's auxiliary window. All
//! three are plain structs over the leaf traits in `net`, `ui` and `util`,
//! so they run unchanged under `cargo test` and in the browser.

pub mod connection;
pub mod content_window;
pub mod status_board;
