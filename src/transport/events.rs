// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event delivery for the mock socket.
//!
//! Frontend code consumes connection events in two styles: some call sites
//! register listeners and unsubscribe later, others assign a single
//! `onmessage`-style callback. [`EventRegistry`] supports both from one
//! emission point — [`EventRegistry::emit`] drives the subscription maps and
//! the assignable slots together, so the two surfaces can never diverge.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a subscription.
///
/// Returned when registering a listener; pass it to
/// [`EventRegistry::unsubscribe`] to stop delivery. IDs are unique within a
/// registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// A connection lifecycle or message event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// The connection finished opening.
    Open,
    /// A response frame arrived, serialized as text.
    Message(String),
    /// The connection closed.
    Close,
    /// A transport error occurred. Declared for API parity with real
    /// connections; the simulator never emits it.
    Error(String),
}

/// Type alias for open/close callbacks.
type LifecycleCallback = Arc<dyn Fn() + Send + Sync>;

/// Type alias for message callbacks, receiving the serialized frame.
type MessageCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Type alias for error callbacks.
type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Registry driving both event-consumption styles of the mock socket.
///
/// Thread-safe via `parking_lot::RwLock`; callbacks are `Arc`-wrapped so
/// dispatch clones are cheap. Callbacks run synchronously on the emitting
/// task, subscription listeners first, then the assigned slot.
pub struct EventRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Subscribed open listeners.
    open_callbacks: RwLock<HashMap<SubscriptionId, LifecycleCallback>>,
    /// Subscribed message listeners.
    message_callbacks: RwLock<HashMap<SubscriptionId, MessageCallback>>,
    /// Subscribed close listeners.
    close_callbacks: RwLock<HashMap<SubscriptionId, LifecycleCallback>>,
    /// Subscribed error listeners.
    error_callbacks: RwLock<HashMap<SubscriptionId, ErrorCallback>>,
    /// Assignable `onopen` slot.
    onopen: RwLock<Option<LifecycleCallback>>,
    /// Assignable `onmessage` slot.
    onmessage: RwLock<Option<MessageCallback>>,
    /// Assignable `onclose` slot.
    onclose: RwLock<Option<LifecycleCallback>>,
    /// Assignable `onerror` slot.
    onerror: RwLock<Option<ErrorCallback>>,
}

impl EventRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            open_callbacks: RwLock::new(HashMap::new()),
            message_callbacks: RwLock::new(HashMap::new()),
            close_callbacks: RwLock::new(HashMap::new()),
            error_callbacks: RwLock::new(HashMap::new()),
            onopen: RwLock::new(None),
            onmessage: RwLock::new(None),
            onclose: RwLock::new(None),
            onerror: RwLock::new(None),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener for the open event.
    pub fn on_open<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.open_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a listener for message events.
    ///
    /// The callback receives each response frame as serialized text.
    pub fn on_message<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.message_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a listener for the close event.
    pub fn on_close<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.close_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a listener for error events.
    pub fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.error_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a listener by its subscription ID.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.open_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.message_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.close_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.error_callbacks.write().remove(&id).is_some() {
            return true;
        }
        false
    }

    /// Clears all listeners and slots.
    pub fn clear(&self) {
        self.open_callbacks.write().clear();
        self.message_callbacks.write().clear();
        self.close_callbacks.write().clear();
        self.error_callbacks.write().clear();
        *self.onopen.write() = None;
        *self.onmessage.write() = None;
        *self.onclose.write() = None;
        *self.onerror.write() = None;
    }

    // =========================================================================
    // Assignable slots
    // =========================================================================

    /// Assigns the `onopen` callback, replacing any previous one.
    pub fn set_onopen<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.onopen.write() = Some(Arc::new(callback));
    }

    /// Assigns the `onmessage` callback, replacing any previous one.
    pub fn set_onmessage<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.onmessage.write() = Some(Arc::new(callback));
    }

    /// Assigns the `onclose` callback, replacing any previous one.
    pub fn set_onclose<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.onclose.write() = Some(Arc::new(callback));
    }

    /// Assigns the `onerror` callback, replacing any previous one.
    pub fn set_onerror<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.onerror.write() = Some(Arc::new(callback));
    }

    /// Removes the `onopen` callback.
    pub fn clear_onopen(&self) {
        *self.onopen.write() = None;
    }

    /// Removes the `onmessage` callback.
    pub fn clear_onmessage(&self) {
        *self.onmessage.write() = None;
    }

    /// Removes the `onclose` callback.
    pub fn clear_onclose(&self) {
        *self.onclose.write() = None;
    }

    /// Removes the `onerror` callback.
    pub fn clear_onerror(&self) {
        *self.onerror.write() = None;
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Emits an event to every subscribed listener and the matching slot.
    ///
    /// This is the single emission point for the socket: nothing else calls
    /// listeners directly.
    pub fn emit(&self, event: &SocketEvent) {
        match event {
            SocketEvent::Open => {
                let snapshot: Vec<_> = self.open_callbacks.read().values().cloned().collect();
                for callback in snapshot {
                    callback();
                }
                if let Some(callback) = self.onopen.read().clone() {
                    callback();
                }
            }
            SocketEvent::Message(text) => {
                let snapshot: Vec<_> = self.message_callbacks.read().values().cloned().collect();
                for callback in snapshot {
                    callback(text);
                }
                if let Some(callback) = self.onmessage.read().clone() {
                    callback(text);
                }
            }
            SocketEvent::Close => {
                let snapshot: Vec<_> = self.close_callbacks.read().values().cloned().collect();
                for callback in snapshot {
                    callback();
                }
                if let Some(callback) = self.onclose.read().clone() {
                    callback();
                }
            }
            SocketEvent::Error(reason) => {
                let snapshot: Vec<_> = self.error_callbacks.read().values().cloned().collect();
                for callback in snapshot {
                    callback(reason);
                }
                if let Some(callback) = self.onerror.read().clone() {
                    callback(reason);
                }
            }
        }
    }

    /// Returns the total number of registered listeners, slots included.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        let slots = usize::from(self.onopen.read().is_some())
            + usize::from(self.onmessage.read().is_some())
            + usize::from(self.onclose.read().is_some())
            + usize::from(self.onerror.read().is_some());
        self.open_callbacks.read().len()
            + self.message_callbacks.read().len()
            + self.close_callbacks.read().len()
            + self.error_callbacks.read().len()
            + slots
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
