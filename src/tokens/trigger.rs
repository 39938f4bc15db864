//! # Trigger-driven tokens and their source.
//!
//! [`TriggerToken`] is a one-shot token fired explicitly with
//! [`TriggerToken::fire`]. [`ChangeSource`] is the token-source capability
//! built on top of it: it always has one armed token and replaces it on every
//! [`ChangeSource::notify`].
//!
//! ## Dispatch
//! ```text
//! fire():
//!   lock ─► Armed(callbacks) → Fired ─► unlock
//!   for cb in callbacks:                 (outside the lock; cb may re-register)
//!     ├─ Ok        ─► next
//!     ├─ Err(e)    ─► warn!(..)          (errors stop here)
//!     └─ panic     ─► error!(..)         (isolated; remaining callbacks still run)
//! ```
//!
//! ## Notify ordering
//! `notify()` installs the fresh token **before** firing the old one, so a
//! callback that immediately asks the source for a new token gets one that will
//! observe the next `notify()`.

use std::mem;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use crate::error::SubscriptionError;
use crate::tokens::token::{ChangeCallback, ChangeToken};

enum TokenState {
    Armed(Vec<ChangeCallback>),
    Fired,
}

/// One-shot token fired by calling [`TriggerToken::fire`].
pub struct TriggerToken {
    state: Mutex<TokenState>,
}

impl TriggerToken {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TokenState::Armed(Vec::new())),
        }
    }

    /// Creates the token already in the fired state.
    #[must_use]
    pub fn fired() -> Self {
        Self {
            state: Mutex::new(TokenState::Fired),
        }
    }

    /// Fires the token, invoking every registered callback once.
    ///
    /// Returns the number of callbacks invoked; `0` if the token had already
    /// fired. Callback errors are logged, panics are caught and logged.
    pub fn fire(&self) -> usize {
        let callbacks = {
            let mut state = self.lock();
            match mem::replace(&mut *state, TokenState::Fired) {
                TokenState::Armed(callbacks) => callbacks,
                TokenState::Fired => return 0,
            }
        };

        let count = callbacks.len();
        for callback in callbacks {
            dispatch(callback);
        }
        count
    }

    /// Number of callbacks waiting for this token.
    pub fn pending_callbacks(&self) -> usize {
        match &*self.lock() {
            TokenState::Armed(callbacks) => callbacks.len(),
            TokenState::Fired => 0,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TriggerToken {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeToken for TriggerToken {
    fn has_changed(&self) -> bool {
        matches!(*self.lock(), TokenState::Fired)
    }

    fn register_change_callback(&self, callback: ChangeCallback) {
        {
            let mut state = self.lock();
            if let TokenState::Armed(callbacks) = &mut *state {
                callbacks.push(callback);
                return;
            }
        }
        dispatch(callback);
    }
}

/// Invokes one callback as the dispatcher: errors are logged, panics isolated.
fn dispatch(callback: ChangeCallback) {
    match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log_callback_error(&e),
        Err(panic) => {
            error!(panic = %panic_message(panic.as_ref()), "change callback panicked");
        }
    }
}

fn log_callback_error(e: &SubscriptionError) {
    warn!(error = %e, label = e.as_label(), "change callback failed");
}

/// Best-effort rendering of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Token source: hands out the current armed token and fires it on `notify()`.
///
/// ```rust
/// use rearm::{ChangeSource, ChangeToken};
///
/// let source = ChangeSource::new();
/// let first = source.token();
/// assert!(!first.has_changed());
///
/// source.notify();
/// assert!(first.has_changed());
/// assert!(!source.token().has_changed());
/// ```
pub struct ChangeSource {
    current: Mutex<Arc<TriggerToken>>,
}

impl ChangeSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Arc::new(TriggerToken::new())),
        }
    }

    /// Creates the source behind an `Arc`, ready for [`ChangeSource::producer`].
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns the currently armed token.
    pub fn token(&self) -> Arc<TriggerToken> {
        Arc::clone(&self.lock())
    }

    /// Signals a change: installs a fresh token, then fires the previous one.
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self) -> usize {
        let fired = {
            let mut current = self.lock();
            mem::replace(&mut *current, Arc::new(TriggerToken::new()))
        };
        fired.fire()
    }

    /// Returns a producer closure that hands out this source's tokens.
    pub fn producer(
        self: &Arc<Self>,
    ) -> impl Fn() -> Result<Arc<TriggerToken>, std::convert::Infallible> + Send + Sync + 'static
    {
        let source = Arc::clone(self);
        move || Ok(source.token())
    }

    fn lock(&self) -> MutexGuard<'_, Arc<TriggerToken>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ChangeSource {
    fn default() -> Self {
        Self::new()
    }
}
