//! # rearm
//!
//! **rearm** keeps a callback attached to a source of one-shot change
//! notifications, forever and without gaps.
//!
//! Many change-detection mechanisms (file watchers, config reloads, cache
//! invalidation) hand out *one-shot* tokens: a token fires once and is dead.
//! Observing every change means grabbing a new token after each firing, and doing
//! it early enough that nothing slips through in between. A [`Subscription`]
//! does exactly that.
//!
//! ## Architecture
//! ```text
//!   producer() ──► token #1 ──(fires)──┐
//!                                      ▼
//!                     ┌──────────────────────────────────┐
//!                     │ Subscription (firing path)       │
//!                     │  1. token #2 = producer()        │◄── serialized per subscription
//!                     │  2. consumer(&state)             │    (FiringQueue)
//!                     │  3. arm token #2  (always)       │
//!                     └───────┬──────────────┬───────────┘
//!                             │              │ producer() failed
//!                             ▼              ▼
//!                      token #2 armed   RenewalPolicy
//!                                        ├─ FailFast ─► Broken
//!                                        └─ Retry    ─► backoff loop on tokio ─► armed again
//!
//!   every step ──► Bus (broadcast Event) + tracing
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                                   |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Subscriptions** | Renewable, gap-free observation with state and disposal.     | [`Subscription`], [`SubscriptionBuilder`]   |
//! | **Tokens**        | One-shot token contract plus trigger and composite tokens.   | [`ChangeToken`], [`ChangeSource`], [`CompositeToken`] |
//! | **Policies**      | What happens when the producer fails mid-chain.              | [`RenewalPolicy`], [`BackoffPolicy`]        |
//! | **Events**        | Lifecycle events over a broadcast bus.                       | [`Event`], [`EventKind`], [`Bus`]           |
//! | **Errors**        | Typed construction and firing errors.                        | [`SubscriptionError`]                       |
//! | **Configuration** | Per-subscription settings.                                   | [`SubscriptionConfig`]                      |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use rearm::{ChangeSource, Subscription, SubscriptionStatus};
//!
//! let source = ChangeSource::shared();
//! let reloads = Arc::new(AtomicUsize::new(0));
//!
//! let r = Arc::clone(&reloads);
//! let sub = Subscription::with_state(
//!     source.producer(),
//!     move |path: &&str| {
//!         r.fetch_add(1, Ordering::SeqCst);
//!         println!("{path} changed");
//!     },
//!     "appsettings.json",
//! )?;
//!
//! for _ in 0..3 {
//!     source.notify();
//! }
//! assert_eq!(reloads.load(Ordering::SeqCst), 3);
//! assert_eq!(sub.status(), SubscriptionStatus::Active);
//! # Ok::<(), rearm::SubscriptionError>(())
//! ```
mod core;
mod error;
mod events;
mod policies;
mod tokens;

// ---- Public re-exports ----

pub use crate::core::{
    ConsumerOutcome, ConsumerRef, ProducerRef, Subscription, SubscriptionBuilder,
    SubscriptionConfig, SubscriptionGuard, SubscriptionStatus,
};
pub use error::{BoxError, SubscriptionError};
pub use events::{Bus, Event, EventKind};
pub use policies::{BackoffPolicy, JitterPolicy, RenewalPolicy, RetryDelays};
pub use tokens::{ChangeCallback, ChangeSource, ChangeToken, CompositeToken, TokenRef, TriggerToken};
