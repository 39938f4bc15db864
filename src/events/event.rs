//! # Lifecycle events emitted by subscriptions.
//!
//! [`EventKind`] covers the three things that happen to a subscription:
//! - **Chain events**: a token was armed, a token fired;
//! - **Failure events**: consumer errors/panics, producer failures and retries;
//! - **Terminal events**: renewal abandoned, subscription disposed.
//!
//! ## Ordering guarantees
//! Every event carries a process-wide monotonic `seq`. Events of one
//! subscription are published from its serialized firing path (or from its
//! single retry task), so `seq` also reflects their causal order.
//!
//! ## Example
//! ```rust
//! use rearm::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ConsumerFailed)
//!     .with_subscription("config")
//!     .with_firing(3)
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::ConsumerFailed);
//! assert_eq!(ev.subscription.as_deref(), Some("config"));
//! assert_eq!(ev.firing, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of subscription events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Chain ===
    /// The firing handler was registered on a fresh token.
    ///
    /// Sets: `subscription`, `firing` (firings processed so far).
    Armed,

    /// The armed token fired and the firing is being processed.
    ///
    /// Sets: `subscription`, `firing` (1-based).
    Fired,

    // === Failures ===
    /// The consumer returned an error. The next token was armed regardless.
    ///
    /// Sets: `subscription`, `firing`, `reason`.
    ConsumerFailed,

    /// The consumer panicked. The next token was armed before unwinding resumed.
    ///
    /// Sets: `subscription`, `firing`, `reason` (panic message if printable).
    ConsumerPanicked,

    /// The producer failed and a retry was scheduled.
    ///
    /// Sets: `subscription`, `attempt` (retry number, 1-based), `delay_ms`, `reason`.
    BackoffScheduled,

    /// A retry obtained a token; the chain is live again.
    ///
    /// Sets: `subscription`, `attempt`.
    RenewalRecovered,

    // === Terminal ===
    /// Renewal was given up; no token is armed any more.
    ///
    /// Sets: `subscription`, `attempt`, `reason`.
    RenewalAbandoned,

    /// The subscription was disposed explicitly.
    ///
    /// Sets: `subscription`.
    Disposed,
}

/// Subscription event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Subscription name.
    pub subscription: Option<Arc<str>>,
    /// Firing number (1-based) the event belongs to.
    pub firing: Option<u64>,
    /// Retry number (1-based).
    pub attempt: Option<u32>,
    /// Delay before the next retry in milliseconds.
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, panic messages).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event with the current timestamp and the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            subscription: None,
            firing: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_subscription(mut self, name: impl Into<Arc<str>>) -> Self {
        self.subscription = Some(name.into());
        self
    }

    #[inline]
    pub fn with_firing(mut self, n: u64) -> Self {
        self.firing = Some(n);
        self
    }

    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u32::MAX)) as u32);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for events after which no token is armed.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::RenewalAbandoned | EventKind::Disposed)
    }
}
