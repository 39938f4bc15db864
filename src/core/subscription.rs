//! # Subscription: the renewable handle.
//!
//! A [`Subscription`] keeps one consumer attached to an endless chain of
//! one-shot tokens. The handle is cheap to clone; all clones refer to the same
//! subscription. Dropping handles does **not** stop observation (the armed
//! token keeps the subscription alive); call [`Subscription::dispose`] or hold
//! a [`SubscriptionGuard`].
//!
//! ## Status
//! ```text
//!              producer() Err, Retry policy
//!   Active ─────────────────────────────► Renewing
//!     ▲ │                                   │ │
//!     │ │ producer() Err, FailFast          │ │ retries exhausted
//!     │ └─────────────────► Broken ◄────────┘ │
//!     └───────────────────────────────────────┘ retry succeeded
//!
//!   any non-Disposed ── dispose() ──► Disposed
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    core::{
        builder::SubscriptionBuilder,
        callbacks::{ConsumerOutcome, ConsumerRef, ProducerRef},
        config::SubscriptionConfig,
        firing::FiringQueue,
    },
    error::{BoxError, SubscriptionError},
    events::{Bus, Event, EventKind},
    tokens::ChangeToken,
};

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubscriptionStatus {
    /// A token is armed; the next change will be observed.
    Active = 0,
    /// The producer failed during renewal; a retry is scheduled.
    Renewing = 1,
    /// Renewal was abandoned; no token is armed.
    Broken = 2,
    /// Disposed by the caller.
    Disposed = 3,
}

impl SubscriptionStatus {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SubscriptionStatus::Active,
            1 => SubscriptionStatus::Renewing,
            2 => SubscriptionStatus::Broken,
            _ => SubscriptionStatus::Disposed,
        }
    }
}

/// Shared state behind every [`Subscription`] handle and every armed callback.
pub(crate) struct Inner<S> {
    pub(crate) name: Arc<str>,
    pub(crate) producer: ProducerRef,
    pub(crate) consumer: ConsumerRef<S>,
    pub(crate) state: S,
    pub(crate) config: SubscriptionConfig,
    pub(crate) bus: Bus,
    pub(crate) runtime: Option<Handle>,
    pub(crate) queue: FiringQueue,
    pub(crate) cancel: CancellationToken,
    status: AtomicU8,
    pub(crate) firings: AtomicU64,
    pub(crate) armed: AtomicU64,
}

impl<S> Inner<S> {
    pub(crate) fn new(
        name: Arc<str>,
        producer: ProducerRef,
        consumer: ConsumerRef<S>,
        state: S,
        config: SubscriptionConfig,
        bus: Bus,
        runtime: Option<Handle>,
    ) -> Self {
        Self {
            name,
            producer,
            consumer,
            state,
            config,
            bus,
            runtime,
            queue: FiringQueue::new(),
            cancel: CancellationToken::new(),
            status: AtomicU8::new(SubscriptionStatus::Active as u8),
            firings: AtomicU64::new(0),
            armed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn status(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn is_disposed(&self) -> bool {
        self.status() == SubscriptionStatus::Disposed
    }

    /// Atomically moves `from → to`; false if the status was not `from`.
    pub(crate) fn transition(&self, from: SubscriptionStatus, to: SubscriptionStatus) -> bool {
        self.status
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn dispose(&self) -> bool {
        let prev = self
            .status
            .swap(SubscriptionStatus::Disposed as u8, Ordering::AcqRel);
        if prev == SubscriptionStatus::Disposed as u8 {
            return false;
        }
        self.cancel.cancel();
        debug!(subscription = %self.name, "subscription disposed");
        self.bus
            .publish(Event::new(EventKind::Disposed).with_subscription(Arc::clone(&self.name)));
        true
    }
}

/// Handle to a renewable subscription.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use rearm::{ChangeSource, Subscription};
///
/// let source = ChangeSource::shared();
/// let changes = Arc::new(AtomicUsize::new(0));
///
/// let c = Arc::clone(&changes);
/// let sub = Subscription::on_change(source.producer(), move || {
///     c.fetch_add(1, Ordering::SeqCst);
/// })
/// .expect("producer is infallible");
///
/// source.notify();
/// source.notify();
/// assert_eq!(changes.load(Ordering::SeqCst), 2);
///
/// assert!(sub.dispose());
/// source.notify();
/// assert_eq!(changes.load(Ordering::SeqCst), 2);
/// ```
pub struct Subscription<S = ()> {
    pub(crate) inner: Arc<Inner<S>>,
}

impl Subscription<()> {
    /// Starts a builder for a subscription without state.
    pub fn builder() -> SubscriptionBuilder<()> {
        SubscriptionBuilder::new(())
    }

    /// Calls `consumer` on every change observed through tokens from `producer`.
    ///
    /// Convenience form of [`Subscription::with_state`] with no state.
    pub fn on_change<P, T, E, F, R>(producer: P, consumer: F) -> Result<Self, SubscriptionError>
    where
        P: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: ChangeToken + 'static,
        E: Into<BoxError>,
        F: Fn() -> R + Send + Sync + 'static,
        R: ConsumerOutcome,
    {
        Self::builder()
            .producer(producer)
            .consumer(move |_: &()| consumer())
            .build()
    }
}

impl<S: Send + Sync + 'static> Subscription<S> {
    /// Calls `consumer(&state)` on every change observed through tokens from `producer`.
    ///
    /// Uses the default [`SubscriptionConfig`]; use [`SubscriptionBuilder`] for more.
    pub fn with_state<P, T, E, F, R>(
        producer: P,
        consumer: F,
        state: S,
    ) -> Result<Self, SubscriptionError>
    where
        P: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: ChangeToken + 'static,
        E: Into<BoxError>,
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: ConsumerOutcome,
    {
        SubscriptionBuilder::new(state)
            .producer(producer)
            .consumer(consumer)
            .build()
    }

    /// Wraps this handle in a guard that disposes the subscription on drop.
    #[must_use]
    pub fn guard(self) -> SubscriptionGuard<S> {
        SubscriptionGuard {
            subscription: self,
            released: false,
        }
    }
}

impl<S> Subscription<S> {
    /// Subscription name used in logs and events.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SubscriptionStatus {
        self.inner.status()
    }

    /// True while the chain is alive (`Active` or `Renewing`).
    pub fn is_observing(&self) -> bool {
        matches!(
            self.status(),
            SubscriptionStatus::Active | SubscriptionStatus::Renewing
        )
    }

    /// Number of firings processed so far.
    pub fn firings(&self) -> u64 {
        self.inner.firings.load(Ordering::Acquire)
    }

    /// Number of tokens the firing handler has been registered on.
    pub fn armed_tokens(&self) -> u64 {
        self.inner.armed.load(Ordering::Acquire)
    }

    /// The state handed to the consumer.
    pub fn state(&self) -> &S {
        &self.inner.state
    }

    /// Receiver for lifecycle events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }

    /// Stops observation.
    ///
    /// No consumer invocation starts and no token is armed after this returns;
    /// a firing already running its consumer finishes but does not re-arm.
    /// Returns `true` only for the call that performed the transition.
    pub fn dispose(&self) -> bool {
        self.inner.dispose()
    }
}

impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.inner.name)
            .field("status", &self.status())
            .field("firings", &self.firings())
            .field("armed_tokens", &self.armed_tokens())
            .finish()
    }
}

/// Disposes the wrapped subscription when dropped.
pub struct SubscriptionGuard<S = ()> {
    subscription: Subscription<S>,
    released: bool,
}

impl<S> SubscriptionGuard<S> {
    /// Releases the subscription without disposing it.
    pub fn into_inner(mut self) -> Subscription<S> {
        self.released = true;
        self.subscription.clone()
    }
}

impl<S> Deref for SubscriptionGuard<S> {
    type Target = Subscription<S>;

    fn deref(&self) -> &Self::Target {
        &self.subscription
    }
}

impl<S> Drop for SubscriptionGuard<S> {
    fn drop(&mut self) {
        if !self.released {
            self.subscription.dispose();
        }
    }
}
