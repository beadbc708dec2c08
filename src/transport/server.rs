// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The out-of-process listener.
//!
//! [`MockServer`] binds a local port and speaks the device protocol over
//! real WebSocket connections, so a frontend dev server can point its
//! transport at `ws://localhost:<port>` unchanged. All connections share one
//! [`StateStore`], like clients of a single physical device.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use crate::engine;
use crate::error::Result;
use crate::message::Request;
use crate::state::{SharedStore, StateStore};

/// A WebSocket listener serving the mock device protocol.
///
/// # Examples
///
/// ```no_run
/// use rainmock_lib::transport::MockServer;
///
/// #[tokio::main]
/// async fn main() -> rainmock_lib::Result<()> {
///     let server = MockServer::bind("127.0.0.1:8080").await?;
///     println!("mock device on ws://{}", server.local_addr()?);
///     server.run().await
/// }
/// ```
#[derive(Debug)]
pub struct MockServer {
    listener: TcpListener,
    store: SharedStore,
    response_delay: Duration,
}

impl MockServer {
    /// The reference listener's per-request latency.
    pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1000);

    /// Binds the listener with a fresh store and the reference latency.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: impl tokio::net::ToSocketAddrs) -> Result<Self> {
        Self::bind_with(addr, StateStore::shared(), Self::DEFAULT_RESPONSE_DELAY).await
    }

    /// Binds the listener against an injected store and latency.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind_with(
        addr: impl tokio::net::ToSocketAddrs,
        store: SharedStore,
        response_delay: Duration,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            store,
            response_delay,
        })
    }

    /// The bound local address. Useful after binding port 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying socket refuses to report it.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// The store shared by all connections.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Accepts connections forever, one task per client.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting a connection fails. Errors on
    /// individual established connections only end that connection.
    pub async fn run(self) -> Result<()> {
        tracing::info!(addr = %self.listener.local_addr()?, "Mock device listening");
        loop {
            let (stream, peer) = self.listener.accept().await?;
            tracing::info!(peer = %peer, "Client connected");

            let store = Arc::clone(&self.store);
            let response_delay = self.response_delay;
            tokio::spawn(async move {
                if let Err(error) = handle_connection(stream, store, response_delay).await {
                    tracing::debug!(peer = %peer, %error, "Connection ended with error");
                }
                tracing::info!(peer = %peer, "Client disconnected");
            });
        }
    }
}

/// Serves one client until it disconnects.
async fn handle_connection(
    stream: TcpStream,
    store: SharedStore,
    response_delay: Duration,
) -> Result<()> {
    let websocket = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut source) = websocket.split();

    while let Some(message) = source.next().await {
        let payload = match message? {
            Message::Text(payload) => payload,
            Message::Close(_) => break,
            // Binary and ping/pong frames carry no requests.
            _ => continue,
        };

        let request: Request = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "Dropping undecodable payload");
                continue;
            }
        };

        let responses = engine::handle(&request, &mut store.write());
        if responses.is_empty() {
            continue;
        }

        tokio::time::sleep(response_delay).await;
        for response in responses {
            let text = serde_json::to_string(&response)?;
            sink.send(Message::text(text)).await?;
        }
    }

    Ok(())
}
