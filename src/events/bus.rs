//! # Event bus for subscription lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. Publishing is
//! a plain `send`, so it works from any thread, including token dispatch
//! threads that have no tokio runtime.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits.
//! - **Bounded capacity**: a single ring buffer keeps the most recent events.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` items.
//! - **No persistence**: with no receivers, events are dropped.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for subscription events.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus; capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers (dropped if there are none).
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
