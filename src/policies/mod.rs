//! Renewal policies.
//!
//! ## Contents
//! - [`RenewalPolicy`] fail-fast vs. retry when the producer fails mid-chain
//! - [`BackoffPolicy`] delay schedule between retries (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization of those delays
//! - [`RetryDelays`]   the jittered delays a retry loop actually sleeps
//!
//! ## Defaults
//! - `RenewalPolicy::FailFast`.
//! - `BackoffPolicy::default()` → first=100ms, factor=2.0, max=10s, jitter=None.

mod backoff;
mod jitter;
mod renewal;

pub use backoff::{BackoffPolicy, RetryDelays};
pub use jitter::JitterPolicy;
pub use renewal::RenewalPolicy;
