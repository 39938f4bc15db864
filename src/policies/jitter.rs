//! # Jitter for renewal retry delays.
//!
//! Many subscriptions often share one producer (one watched directory, one
//! config source). When that producer fails they all retry; jitter keeps the
//! retries from landing on the same instant.
//!
//! - [`JitterPolicy::None`] exact delay
//! - [`JitterPolicy::Full`] random in `[0, delay]`
//! - [`JitterPolicy::Equal`] random in `[delay/2, delay]`
//! - [`JitterPolicy::Decorrelated`] random in `[first, prev × 3]`, where `prev`
//!   is the delay actually slept before the previous retry
//!
//! Sampling works on [`Duration`] directly, so sub-millisecond delays keep
//! their precision.

use std::time::Duration;

use rand::Rng;

/// Randomization applied to a backoff delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the computed delay as is.
    #[default]
    None,
    /// Random delay in `[0, delay]`.
    Full,
    /// Random delay in `[delay/2, delay]`.
    Equal,
    /// Random delay in `[first, prev × 3]`, capped at `max`.
    ///
    /// Ignores the exponential schedule; each delay grows from the previous
    /// one instead. Before the first retry `prev` is `first`.
    Decorrelated,
}

impl JitterPolicy {
    /// Picks the delay before the next retry.
    ///
    /// - `base`: unjittered delay from the exponential schedule;
    /// - `prev`: delay slept before the previous retry (`None` before the first);
    /// - `floor`/`cap`: the backoff's `first` and `max`.
    ///
    /// The result never exceeds `cap`.
    pub fn spread(
        &self,
        base: Duration,
        prev: Option<Duration>,
        floor: Duration,
        cap: Duration,
    ) -> Duration {
        let base = base.min(cap);
        match self {
            JitterPolicy::None => base,
            JitterPolicy::Full => between(Duration::ZERO, base),
            JitterPolicy::Equal => {
                let half = base / 2;
                half + between(Duration::ZERO, base - half)
            }
            JitterPolicy::Decorrelated => {
                let floor = floor.min(cap);
                let upper = prev.unwrap_or(floor).saturating_mul(3).min(cap);
                between(floor, upper)
            }
        }
    }
}

/// Uniform sample in `[lo, hi]`; `lo` when the range is empty.
fn between(lo: Duration, hi: Duration) -> Duration {
    if hi <= lo {
        return lo;
    }
    rand::rng().random_range(lo..=hi)
}
