// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RainMock` Lib - a mock sprinkler controller backend for frontend
//! development.
//!
//! Real controller hardware is rarely on the desk while the frontend is
//! being built. This crate stands in for it: a stateful simulator of the
//! device's WebSocket protocol that answers every request type with a
//! plausible response, including the artificial latency of a real round
//! trip. State (wifi connection, zones, programs, settings) persists for
//! the lifetime of a [`state::StateStore`], so toggling a zone off really
//! shows up disabled in the next `zone_list`.
//!
//! # Two Ways To Run It
//!
//! ## In-Process Shim
//!
//! [`transport::MockWebSocket`] exposes the lifecycle and event surface of
//! a real connection object — readiness state, `send`/`close`, assignable
//! `onopen`/`onmessage`/`onclose`/`onerror` callbacks, and
//! subscribe/unsubscribe listeners — without touching the network:
//!
//! ```no_run
//! use rainmock_lib::transport::MockWebSocket;
//!
//! #[tokio::main]
//! async fn main() {
//!     let socket = MockWebSocket::connect("ws://device.local/ws");
//!     socket.set_onopen(|| println!("connected"));
//!     socket.set_onmessage(|frame| println!("<- {frame}"));
//!     socket.send(r#"{"type":"get_settings"}"#);
//!     # tokio::time::sleep(std::time::Duration::from_millis(500)).await;
//! }
//! ```
//!
//! ## Standalone Listener
//!
//! With the default `server` feature, [`transport::MockServer`] serves the
//! same protocol over real WebSocket connections, sharing one device state
//! across all clients:
//!
//! ```no_run
//! use rainmock_lib::transport::MockServer;
//!
//! #[tokio::main]
//! async fn main() -> rainmock_lib::Result<()> {
//!     let server = MockServer::bind("127.0.0.1:8080").await?;
//!     server.run().await
//! }
//! ```
//!
//! # Driving The Engine Directly
//!
//! Tests that do not care about transport semantics can call the response
//! engine with their own store:
//!
//! ```
//! use rainmock_lib::engine;
//! use rainmock_lib::message::{Request, Response};
//! use rainmock_lib::state::StateStore;
//!
//! let mut store = StateStore::new();
//! let responses = engine::handle(&Request::GetZones, &mut store);
//! assert!(matches!(responses[0], Response::ZoneList { .. }));
//! ```

pub mod engine;
pub mod error;
pub mod message;
pub mod state;
pub mod transport;

pub use error::{Error, Result};
pub use message::{Request, Response};
pub use state::{SharedStore, StateStore};
#[cfg(feature = "server")]
pub use transport::MockServer;
pub use transport::{MockWebSocket, ReadyState, SubscriptionId, Timing};
