//! Browser WebSocket transport.
//!
//! Each attempt runs as a local task that waits for the handshake, forwards
//! frames as [`TransportEvent`]s, and reports `Close` when the stream ends.
//! Detaching sends on the attempt's oneshot; the task then closes the socket
//! and exits without reporting anything further.
//!
//! HANDSHAKE
//! =========
//! The socket's sink turns ready as soon as it leaves CONNECTING, whether it
//! opened or was refused. [`Handshake::from_ready_state`] decides which from
//! `readyState` at that point, and only an OPEN socket reports `Open`.
//!
//! ERROR HANDLING
//! ==============
//! Socket errors are reported as `Error` events and the task keeps reading;
//! the browser follows every error with a close, which ends the stream.

#[cfg(test)]
#[path = "ws_transport_test.rs"]
mod ws_transport_test;

use super::transport::TransportEvent;

/// `WebSocket.readyState` while the opening handshake runs.
pub const READY_STATE_CONNECTING: u16 = 0;
/// `WebSocket.readyState` once the handshake succeeded.
pub const READY_STATE_OPEN: u16 = 1;
pub const READY_STATE_CLOSING: u16 = 2;
pub const READY_STATE_CLOSED: u16 = 3;

/// Outcome of an opening handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handshake {
    Open,
    /// The socket left CONNECTING without opening.
    Refused,
}

impl Handshake {
    /// Judge the handshake from `readyState` once the socket is no longer
    /// connecting. Anything but OPEN is a refusal.
    pub fn from_ready_state(ready_state: u16) -> Self {
        if ready_state == READY_STATE_OPEN { Self::Open } else { Self::Refused }
    }

    /// Events reported for the attempt as soon as the handshake settles.
    pub fn opening_events(self) -> Vec<TransportEvent> {
        match self {
            Self::Open => vec![TransportEvent::Open],
            Self::Refused => vec![
                TransportEvent::Error("connection refused before open".to_owned()),
                TransportEvent::Close,
            ],
        }
    }
}

#[cfg(feature = "hydrate")]
pub use self::socket::{EventSink, WsTransport};

#[cfg(feature = "hydrate")]
mod socket {
    use std::collections::HashMap;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::future::{self, Either};
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::futures::WebSocket;
    use gloo_net::websocket::{Message, State, WebSocketError};

    use super::{
        Handshake, READY_STATE_CLOSED, READY_STATE_CLOSING, READY_STATE_CONNECTING, READY_STATE_OPEN,
    };
    use crate::error::ClientError;
    use crate::net::transport::{AttemptId, Transport, TransportEvent};

    /// Callback that receives every event of every attempt.
    pub type EventSink = Rc<dyn Fn(AttemptId, TransportEvent)>;

    /// Transport over `gloo-net` WebSockets.
    pub struct WsTransport {
        sink: EventSink,
        detach: HashMap<AttemptId, oneshot::Sender<()>>,
    }

    impl WsTransport {
        pub fn new(sink: EventSink) -> Self {
            Self { sink, detach: HashMap::new() }
        }
    }

    impl Transport for WsTransport {
        fn open(&mut self, url: &str, attempt: AttemptId) -> Result<(), ClientError> {
            let socket = WebSocket::open(url).map_err(|e| ClientError::Transport(e.to_string()))?;
            let (detach_tx, detach_rx) = oneshot::channel();
            self.detach.insert(attempt, detach_tx);
            wasm_bindgen_futures::spawn_local(drive_socket(socket, attempt, Rc::clone(&self.sink), detach_rx));
            Ok(())
        }

        fn detach(&mut self, attempt: AttemptId) {
            if let Some(tx) = self.detach.remove(&attempt) {
                // The task may already have finished; nothing left to stop then.
                let _ = tx.send(());
            }
        }
    }

    fn ready_state(socket: &WebSocket) -> u16 {
        match socket.state() {
            State::Connecting => READY_STATE_CONNECTING,
            State::Open => READY_STATE_OPEN,
            State::Closing => READY_STATE_CLOSING,
            State::Closed => READY_STATE_CLOSED,
        }
    }

    async fn drive_socket(
        mut socket: WebSocket,
        attempt: AttemptId,
        sink: EventSink,
        mut detach: oneshot::Receiver<()>,
    ) {
        let settled = {
            let ready = future::poll_fn(|cx| socket.poll_ready_unpin(cx));
            match future::select(Box::pin(ready), &mut detach).await {
                Either::Left((ready, _)) => Some(ready),
                Either::Right(_) => None,
            }
        };
        let Some(ready) = settled else {
            close_detached(socket);
            return;
        };

        let handshake = match ready {
            Ok(()) => Handshake::from_ready_state(ready_state(&socket)),
            Err(err) => {
                log::debug!("socket {attempt} failed while connecting: {err}");
                Handshake::Refused
            }
        };
        for event in handshake.opening_events() {
            sink(attempt, event);
        }
        if handshake == Handshake::Refused {
            return;
        }

        loop {
            let item = match future::select(socket.next(), &mut detach).await {
                Either::Left((item, _)) => Some(item),
                Either::Right(_) => None,
            };
            let Some(item) = item else {
                close_detached(socket);
                return;
            };
            match item {
                Some(Ok(Message::Text(text))) => sink(attempt, TransportEvent::Message(text)),
                Some(Ok(Message::Bytes(bytes))) => {
                    sink(attempt, TransportEvent::Message(String::from_utf8_lossy(&bytes).into_owned()));
                }
                Some(Err(WebSocketError::ConnectionClose(event))) => {
                    log::debug!("socket {attempt} closed: code={} reason={:?}", event.code, event.reason);
                    break;
                }
                Some(Err(err)) => sink(attempt, TransportEvent::Error(err.to_string())),
                None => break,
            }
        }
        sink(attempt, TransportEvent::Close);
    }

    fn close_detached(socket: WebSocket) {
        if let Err(err) = socket.close(None, None) {
            log::debug!("closing detached socket failed: {err}");
        }
    }
}
