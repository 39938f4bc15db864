//! # What to do when the producer fails during a renewal.
//!
//! A firing always asks the producer for the next token. If that call fails the
//! token chain is broken; [`RenewalPolicy`] decides whether the subscription
//! gives up immediately or keeps trying in the background.
//!
//! ```text
//! token fired ─► producer() ─► Err
//!                  ├─ FailFast ─► consumer skipped, status = Broken,
//!                  │              Producer error to dispatcher
//!                  └─ Retry    ─► consumer still runs, status = Renewing
//!                                 loop {
//!                                   sleep(delays.next())     (cancelled by dispose)
//!                                   producer() ─► Ok  ─► arm, status = Active
//!                                              └► Err ─► give up after max_attempts
//!                                 }
//! ```

use crate::policies::backoff::BackoffPolicy;

/// Policy applied when the producer fails while renewing after a firing.
///
/// Construction is always fail-fast: a failing first `producer()` call is
/// returned from the builder regardless of this policy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RenewalPolicy {
    /// Give up on the first failure (default).
    ///
    /// The firing that hit the failure does not reach the consumer.
    #[default]
    FailFast,
    /// Retry on the tokio runtime with backoff between attempts.
    ///
    /// The consumer still sees the firing; the chain is expected to recover.
    Retry {
        /// Delay schedule between attempts.
        backoff: BackoffPolicy,
        /// Maximum number of retries; `None` retries until disposed.
        max_attempts: Option<u32>,
    },
}

impl RenewalPolicy {
    /// Retry forever with the given backoff.
    pub fn retry(backoff: BackoffPolicy) -> Self {
        RenewalPolicy::Retry {
            backoff,
            max_attempts: None,
        }
    }

    /// Retry at most `max_attempts` times with the given backoff.
    pub fn retry_bounded(backoff: BackoffPolicy, max_attempts: u32) -> Self {
        RenewalPolicy::Retry {
            backoff,
            max_attempts: Some(max_attempts),
        }
    }

    /// True if this policy spawns retries (and therefore needs a runtime).
    pub fn needs_runtime(&self) -> bool {
        matches!(self, RenewalPolicy::Retry { .. })
    }
}
