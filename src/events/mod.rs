//! Subscription events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! Publishers are the firing path and the renewal retry task of each
//! subscription; receivers come from `Subscription::events()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
