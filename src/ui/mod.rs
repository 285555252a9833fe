//! Page-facing interfaces of the state machines.
//!
//! SYSTEM CONTEXT
//! ==============
//! The pages are server-rendered; this crate only toggles and relabels
//! elements it knows by id (`projector`) and asks the browser to reload or
//! open windows (`browser`). `dom` implements both over `web-sys`.

pub mod browser;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod projector;
