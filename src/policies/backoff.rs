//! # Backoff between renewal retries.
//!
//! [`BackoffPolicy`] controls how long a subscription waits before calling a
//! failing producer again. The unjittered delay for retry `n` (0-indexed) is
//! `first × factor^n`, clamped to `max`; see [`BackoffPolicy::base`].
//!
//! A retry loop walks [`BackoffPolicy::delays`], which applies jitter and
//! remembers the previous delay for [`JitterPolicy::Decorrelated`].
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use rearm::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(50),
//!     max: Duration::from_secs(2),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! let delays: Vec<_> = backoff.delays().take(3).collect();
//! assert_eq!(
//!     delays,
//!     [50, 100, 200].map(Duration::from_millis).to_vec()
//! );
//! assert_eq!(backoff.base(20), Duration::from_secs(2));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Delay schedule for renewal retries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry; also the floor for decorrelated jitter.
    pub first: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Randomization applied on top of the base delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// `first = 100ms`, `factor = 2.0`, `max = 10s`, no jitter.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(100),
            max: Duration::from_secs(10),
            factor: 2.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Constant delay, no growth and no jitter.
    pub fn constant(delay: Duration) -> Self {
        Self {
            first: delay,
            max: delay,
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }

    /// Unjittered delay before retry `retry` (0-indexed).
    ///
    /// Values that overflow, go negative or are not finite clamp to `max`.
    pub fn base(&self, retry: u32) -> Duration {
        let exp = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);
        if !secs.is_finite() || secs < 0.0 {
            return self.max;
        }
        Duration::try_from_secs_f64(secs).map_or(self.max, |d| d.min(self.max))
    }

    /// Jittered delays for consecutive retries, starting at retry 0.
    pub fn delays(&self) -> RetryDelays {
        RetryDelays {
            policy: *self,
            retry: 0,
            prev: None,
        }
    }
}

/// Endless iterator over retry delays; see [`BackoffPolicy::delays`].
#[derive(Clone, Debug)]
pub struct RetryDelays {
    policy: BackoffPolicy,
    retry: u32,
    prev: Option<Duration>,
}

impl Iterator for RetryDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let p = &self.policy;
        let delay = p
            .jitter
            .spread(p.base(self.retry), self.prev, p.first, p.max);
        self.retry = self.retry.saturating_add(1);
        self.prev = Some(delay);
        Some(delay)
    }
}
