//! # Firing path: renew, invoke, re-arm.
//!
//! Every armed token carries a callback that enters [`Inner::on_fired`].
//! Firings of one subscription are serialized through a [`FiringQueue`]:
//!
//! ```text
//! on_fired():
//!   queue.enter() ── already draining? ──► pending += 1, return Ok  (handled by the drainer)
//!        │
//!        ▼ (this call becomes the drainer)
//!   while queue.next():
//!     process_firing():
//!       ├─► 1. next = producer()            (before the consumer: no missed window)
//!       │      Err + FailFast ─► Broken, return Producer error (consumer skipped)
//!       ├─► 2. consumer(&state)             (catch_unwind)
//!       ├─► 3. arm(next) / renewal policy   (always, whatever step 2 did)
//!       └─► outcome: Done | Failed(err) | Panicked(payload)
//!   resume first panic, else return first error to the dispatcher
//! ```
//!
//! Arming may fire the new token synchronously; that nested `on_fired` only
//! bumps `pending`, so re-entrant firings become loop iterations instead of
//! recursion, and the consumer never runs concurrently with itself.

use std::any::Any;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::{
    core::{renewal, subscription::Inner, subscription::SubscriptionStatus},
    error::{BoxError, SubscriptionError},
    events::{Event, EventKind},
    policies::RenewalPolicy,
    tokens::{panic_message, TokenRef},
};

#[derive(Default)]
struct QueueState {
    pending: u64,
    draining: bool,
}

/// Per-subscription serialization of firings.
#[derive(Default)]
pub(crate) struct FiringQueue {
    state: Mutex<QueueState>,
}

impl FiringQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one firing. Returns `true` if the caller must drain the queue.
    pub(crate) fn enter(&self) -> bool {
        let mut q = self.lock();
        q.pending += 1;
        if q.draining {
            return false;
        }
        q.draining = true;
        true
    }

    /// Takes one pending firing; when none is left, ends the drain.
    pub(crate) fn next(&self) -> bool {
        let mut q = self.lock();
        if q.pending == 0 {
            q.draining = false;
            return false;
        }
        q.pending -= 1;
        true
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

enum FiringOutcome {
    Done,
    Failed(SubscriptionError),
    Panicked(Box<dyn Any + Send>),
}

impl<S: Send + Sync + 'static> Inner<S> {
    /// Firing handler registered on every armed token.
    pub(crate) fn on_fired(self: &Arc<Self>) -> Result<(), SubscriptionError> {
        if !self.queue.enter() {
            return Ok(());
        }

        let mut first_error: Option<SubscriptionError> = None;
        let mut first_panic: Option<Box<dyn Any + Send>> = None;

        while self.queue.next() {
            match self.process_firing() {
                FiringOutcome::Done => {}
                FiringOutcome::Failed(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                FiringOutcome::Panicked(payload) => {
                    if first_panic.is_none() {
                        first_panic = Some(payload);
                    }
                }
            }
        }

        if let Some(payload) = first_panic {
            resume_unwind(payload);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn process_firing(self: &Arc<Self>) -> FiringOutcome {
        if self.is_disposed() {
            return FiringOutcome::Done;
        }

        let firing = self.firings.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(subscription = %self.name, firing, "change token fired");
        self.bus.publish(
            Event::new(EventKind::Fired)
                .with_subscription(Arc::clone(&self.name))
                .with_firing(firing),
        );

        let next = self.produce();

        // Disposed while renewing: the in-flight firing becomes a no-op.
        if self.is_disposed() {
            return FiringOutcome::Done;
        }
        let next = match next {
            Err(error) if matches!(self.config.renewal, RenewalPolicy::FailFast) => {
                self.abandon(1, &error);
                return FiringOutcome::Failed(SubscriptionError::Producer { attempts: 1, error });
            }
            next => next,
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| (self.consumer)(&self.state)));

        let renewal = match next {
            Ok(token) => {
                self.arm(token);
                Ok(())
            }
            Err(e) => self.renewal_failed(e),
        };

        match outcome {
            Ok(Ok(())) => match renewal {
                Ok(()) => FiringOutcome::Done,
                Err(e) => FiringOutcome::Failed(e),
            },
            Ok(Err(error)) => {
                warn!(subscription = %self.name, firing, error = %error, "consumer failed");
                self.bus.publish(
                    Event::new(EventKind::ConsumerFailed)
                        .with_subscription(Arc::clone(&self.name))
                        .with_firing(firing)
                        .with_reason(error.to_string()),
                );
                FiringOutcome::Failed(SubscriptionError::Consumer { error })
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                error!(subscription = %self.name, firing, panic = %msg, "consumer panicked");
                self.bus.publish(
                    Event::new(EventKind::ConsumerPanicked)
                        .with_subscription(Arc::clone(&self.name))
                        .with_firing(firing)
                        .with_reason(msg),
                );
                FiringOutcome::Panicked(payload)
            }
        }
    }

    /// Calls the producer; a panicking producer counts as a failed one.
    pub(crate) fn produce(&self) -> Result<TokenRef, BoxError> {
        match catch_unwind(AssertUnwindSafe(|| (self.producer)())) {
            Ok(res) => res,
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                Err(format!("producer panicked: {msg}").into())
            }
        }
    }

    /// Registers the firing handler on `token`, unless disposed.
    pub(crate) fn arm(self: &Arc<Self>, token: TokenRef) {
        if self.is_disposed() {
            return;
        }
        let armed = self.armed.fetch_add(1, Ordering::AcqRel) + 1;
        let firing = self.firings.load(Ordering::Acquire);
        debug!(subscription = %self.name, armed, "change token armed");
        self.bus.publish(
            Event::new(EventKind::Armed)
                .with_subscription(Arc::clone(&self.name))
                .with_firing(firing),
        );

        let this = Arc::clone(self);
        token.register_change_callback(Box::new(move || this.on_fired()));
    }

    /// Schedules renewal retries after a producer failure during a firing.
    fn renewal_failed(self: &Arc<Self>, error: BoxError) -> Result<(), SubscriptionError> {
        match (self.config.renewal, &self.runtime) {
            (RenewalPolicy::Retry { backoff, max_attempts }, Some(runtime)) => {
                if !self.transition(SubscriptionStatus::Active, SubscriptionStatus::Renewing) {
                    return Ok(());
                }
                runtime.spawn(renewal::retry(Arc::clone(self), backoff, max_attempts, error));
                Ok(())
            }
            _ => {
                self.abandon(1, &error);
                Err(SubscriptionError::Producer { attempts: 1, error })
            }
        }
    }

    /// Marks the chain as broken (unless disposed meanwhile).
    pub(crate) fn abandon(&self, attempts: u32, error: &BoxError) {
        let broken = self.transition(SubscriptionStatus::Active, SubscriptionStatus::Broken)
            || self.transition(SubscriptionStatus::Renewing, SubscriptionStatus::Broken);
        if !broken {
            return;
        }
        error!(
            subscription = %self.name,
            attempts,
            error = %error,
            "renewal abandoned; no change token armed"
        );
        self.bus.publish(
            Event::new(EventKind::RenewalAbandoned)
                .with_subscription(Arc::clone(&self.name))
                .with_attempt(attempts)
                .with_reason(error.to_string()),
        );
    }
}
