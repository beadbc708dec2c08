// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports carrying the mock protocol.
//!
//! Two shapes of the same engine:
//!
//! - [`MockWebSocket`]: in-process shim with the lifecycle and event
//!   surface of a real connection object. No networking at all.
//! - [`MockServer`] (feature `server`): a real WebSocket listener on a
//!   local port, for frontends that want to keep their production
//!   transport code path.
//!
//! Both decode inbound frames, run the response engine, and deliver the
//! resulting frames in order after an artificial delay.

mod events;
mod socket;
#[cfg(feature = "server")]
mod server;

pub use events::{EventRegistry, SocketEvent, SubscriptionId};
pub use socket::{MockWebSocket, ReadyState, Timing};
#[cfg(feature = "server")]
pub use server::MockServer;
