// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The in-process connection shim.
//!
//! [`MockWebSocket`] is a drop-in stand-in for a real WebSocket connection
//! to the sprinkler controller. It reproduces the observable lifecycle of
//! the real transport — a connection-opening delay, per-message latency,
//! ordered delivery of multi-frame responses — while never touching the
//! network: sends are decoded in-process and answered by the response
//! engine.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::engine;
use crate::message::Request;
use crate::state::{SharedStore, StateStore};

use super::events::{EventRegistry, SocketEvent, SubscriptionId};

/// Lifecycle state of the mock connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Construction finished, open delay still running.
    Connecting,
    /// Open event fired; sends are answered.
    Open,
    /// Closed by [`MockWebSocket::close`]. Terminal.
    Closed,
    /// Reserved to mirror real transports; the simulator never enters it.
    Error,
}

/// Artificial latency of the mock connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay between construction and the open event.
    pub open_delay: Duration,
    /// Delay between a send and delivery of its responses.
    pub message_delay: Duration,
}

impl Default for Timing {
    /// The delays of the reference device shim: 100 ms to open, 200 ms per
    /// message round trip.
    fn default() -> Self {
        Self {
            open_delay: Duration::from_millis(100),
            message_delay: Duration::from_millis(200),
        }
    }
}

impl Timing {
    /// Zero latency everywhere. Handy for tests that assert on behavior
    /// rather than timing.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            open_delay: Duration::ZERO,
            message_delay: Duration::ZERO,
        }
    }
}

/// A fake bidirectional connection to the mock device.
///
/// Presents the same surface as a live connection object: a readiness
/// state, [`send`](Self::send) / [`close`](Self::close), assignable
/// `onopen`/`onmessage`/`onclose`/`onerror` callbacks, and a
/// subscribe/unsubscribe listener API. Both consumption styles fire for
/// every event.
///
/// # Examples
///
/// ```no_run
/// use rainmock_lib::transport::MockWebSocket;
///
/// # async fn example() {
/// let socket = MockWebSocket::connect("ws://device.local/ws");
/// socket.set_onmessage(|frame| println!("got {frame}"));
/// socket.set_onopen(|| println!("open"));
/// socket.send(r#"{"type":"get_zones"}"#);
/// # }
/// ```
pub struct MockWebSocket {
    url: String,
    state: Arc<RwLock<ReadyState>>,
    events: Arc<EventRegistry>,
    store: SharedStore,
    timing: Timing,
}

impl MockWebSocket {
    /// Opens a mock connection with a private, freshly seeded store and the
    /// reference delays.
    ///
    /// The `url` is recorded but never interpreted; any string works. The
    /// connection starts in [`ReadyState::Connecting`] and fires its open
    /// event after [`Timing::open_delay`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, which is needed to drive
    /// the delayed open transition.
    #[must_use]
    pub fn connect(url: impl Into<String>) -> Self {
        Self::connect_with(url, StateStore::shared(), Timing::default())
    }

    /// Opens a mock connection against an injected store.
    ///
    /// Passing the same [`SharedStore`] to several sockets makes mutations
    /// visible across all of them, like multiple frontends talking to one
    /// physical device.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn connect_with(url: impl Into<String>, store: SharedStore, timing: Timing) -> Self {
        let socket = Self {
            url: url.into(),
            state: Arc::new(RwLock::new(ReadyState::Connecting)),
            events: Arc::new(EventRegistry::new()),
            store,
            timing,
        };

        tracing::debug!(url = %socket.url, "Opening mock connection");

        let state = Arc::clone(&socket.state);
        let events = Arc::clone(&socket.events);
        let open_delay = timing.open_delay;
        tokio::spawn(async move {
            tokio::time::sleep(open_delay).await;
            {
                let mut state = state.write();
                // close() may have won the race; a closed socket never opens.
                if *state != ReadyState::Connecting {
                    return;
                }
                *state = ReadyState::Open;
            }
            events.emit(&SocketEvent::Open);
        });

        socket
    }

    /// The connection target given at construction.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn ready_state(&self) -> ReadyState {
        *self.state.read()
    }

    /// The store this connection runs against.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Sends a serialized request frame to the mock device.
    ///
    /// Payloads that are not valid JSON for a request envelope are dropped
    /// silently: no response, no error event — exactly how the reference
    /// shim behaves. Valid requests are answered after
    /// [`Timing::message_delay`], each response frame arriving as its own
    /// message event in engine order.
    ///
    /// Sends are accepted in any state. A request sent while still
    /// [`ReadyState::Connecting`] is processed normally; its responses can
    /// only be lost again if the socket is closed before delivery.
    pub fn send(&self, payload: &str) {
        let request: Request = match serde_json::from_str(payload) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "Dropping undecodable payload");
                return;
            }
        };

        let responses = engine::handle(&request, &mut self.store.write());
        if responses.is_empty() {
            return;
        }

        let state = Arc::clone(&self.state);
        let events = Arc::clone(&self.events);
        let message_delay = self.timing.message_delay;
        // One task delivers the whole batch so relative order holds even if
        // equal-delay timers fire out of order.
        tokio::spawn(async move {
            tokio::time::sleep(message_delay).await;
            for response in responses {
                // Closing cancels whatever has not been delivered yet.
                if *state.read() == ReadyState::Closed {
                    tracing::debug!("Discarding response for closed connection");
                    return;
                }
                match serde_json::to_string(&response) {
                    Ok(text) => events.emit(&SocketEvent::Message(text)),
                    Err(error) => tracing::error!(%error, "Failed to serialize response"),
                }
            }
        });
    }

    /// Closes the connection immediately and fires the close event.
    ///
    /// Responses not yet delivered are discarded. Closing an already closed
    /// socket is a no-op.
    pub fn close(&self) {
        {
            let mut state = self.state.write();
            if *state == ReadyState::Closed {
                return;
            }
            *state = ReadyState::Closed;
        }
        tracing::debug!(url = %self.url, "Closing mock connection");
        self.events.emit(&SocketEvent::Close);
    }

    // =========================================================================
    // Event surface
    // =========================================================================

    /// Subscribes to the open event.
    pub fn on_open<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.on_open(callback)
    }

    /// Subscribes to message events. The callback receives each response
    /// frame as serialized text.
    pub fn on_message<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.on_message(callback)
    }

    /// Subscribes to the close event.
    pub fn on_close<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.on_close(callback)
    }

    /// Subscribes to error events. Never fired by the simulator; present so
    /// code written for real transports keeps working.
    pub fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.on_error(callback)
    }

    /// Unsubscribes a listener. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Assigns the `onopen` callback slot.
    pub fn set_onopen<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.set_onopen(callback);
    }

    /// Assigns the `onmessage` callback slot.
    pub fn set_onmessage<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.set_onmessage(callback);
    }

    /// Assigns the `onclose` callback slot.
    pub fn set_onclose<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.set_onclose(callback);
    }

    /// Assigns the `onerror` callback slot.
    pub fn set_onerror<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.set_onerror(callback);
    }

    /// Clears the `onopen` callback slot.
    pub fn clear_onopen(&self) {
        self.events.clear_onopen();
    }

    /// Clears the `onmessage` callback slot.
    pub fn clear_onmessage(&self) {
        self.events.clear_onmessage();
    }

    /// Clears the `onclose` callback slot.
    pub fn clear_onclose(&self) {
        self.events.clear_onclose();
    }

    /// Clears the `onerror` callback slot.
    pub fn clear_onerror(&self) {
        self.events.clear_onerror();
    }
}

impl std::fmt::Debug for MockWebSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockWebSocket")
            .field("url", &self.url)
            .field("ready_state", &self.ready_state())
            .finish_non_exhaustive()
    }
}
