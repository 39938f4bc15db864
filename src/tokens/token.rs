//! # One-shot change tokens.
//!
//! A [`ChangeToken`] stands for "waiting for one future change". It fires its
//! registered callbacks at most once and is inert afterwards; observing the next
//! change means asking the producer for a new token.
//!
//! ## Contract
//! - Each registered [`ChangeCallback`] is invoked **at most once**.
//! - Registering on a token that already fired invokes the callback
//!   immediately, on the registering thread.
//! - Whoever fires the token (the *dispatcher*) receives each callback's
//!   `Result` and decides what to do with errors.

use std::sync::Arc;

use crate::error::SubscriptionError;

/// Callback registered on a token; invoked at most once by the dispatcher.
pub type ChangeCallback = Box<dyn FnOnce() -> Result<(), SubscriptionError> + Send + 'static>;

/// Shared handle to a type-erased token.
pub type TokenRef = Arc<dyn ChangeToken>;

/// A one-shot notification that some condition has changed.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use rearm::{ChangeToken, TriggerToken};
///
/// let token = TriggerToken::new();
/// let hit = Arc::new(AtomicBool::new(false));
/// let h = Arc::clone(&hit);
/// token.register_change_callback(Box::new(move || {
///     h.store(true, Ordering::SeqCst);
///     Ok(())
/// }));
///
/// assert!(!token.has_changed());
/// token.fire();
/// assert!(token.has_changed());
/// assert!(hit.load(Ordering::SeqCst));
/// ```
pub trait ChangeToken: Send + Sync {
    /// True once the represented change has happened.
    fn has_changed(&self) -> bool;

    /// Registers a callback to run when the token fires.
    ///
    /// If the token already fired, the callback runs before this call returns.
    fn register_change_callback(&self, callback: ChangeCallback);
}

impl<T: ChangeToken + ?Sized> ChangeToken for Arc<T> {
    fn has_changed(&self) -> bool {
        (**self).has_changed()
    }

    fn register_change_callback(&self, callback: ChangeCallback) {
        (**self).register_change_callback(callback)
    }
}

impl<T: ChangeToken + ?Sized> ChangeToken for Box<T> {
    fn has_changed(&self) -> bool {
        (**self).has_changed()
    }

    fn register_change_callback(&self, callback: ChangeCallback) {
        (**self).register_change_callback(callback)
    }
}
