//! Transport contract consumed by the connection state machines.
//!
//! DESIGN
//! ======
//! A transport opens one socket per [`AttemptId`] and reports lifecycle
//! events tagged with that id. Detaching an attempt closes its socket
//! without reporting a `Close`, and the state machines drop any event whose
//! attempt is no longer current. Together those two rules keep a manual
//! reconnect from re-entering the close path of the socket it replaced.

use std::fmt;

use crate::error::ClientError;

/// Identifies one connection attempt issued by a state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    /// The first attempt a state machine issues.
    pub const FIRST: Self = Self(1);

    /// The attempt issued after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle event reported by a transport for one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// The channel finished its handshake.
    Open,
    /// A message arrived; text frames verbatim, binary frames lossily decoded.
    Message(String),
    /// The channel closed, cleanly or not.
    Close,
    /// The channel reported an error. Usually followed by `Close`.
    Error(String),
}

/// Bidirectional message channel addressed by URL.
pub trait Transport {
    /// Start opening `url` for `attempt`. Events for the attempt are
    /// delivered later through the transport's own callback path.
    ///
    /// An `Err` means the channel could not even be created and no events
    /// will follow for `attempt`.
    fn open(&mut self, url: &str, attempt: AttemptId) -> Result<(), ClientError>;

    /// Stop reporting events for `attempt` and close its channel.
    fn detach(&mut self, attempt: AttemptId);
}
