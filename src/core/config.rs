//! # Subscription configuration.
//!
//! [`SubscriptionConfig`] centralizes the knobs a subscription reads at build
//! time: what to do when renewal fails, and how many events the bus buffers.

use crate::policies::RenewalPolicy;

/// Configuration for one subscription.
///
/// ## Field semantics
/// - `renewal`: producer-failure policy during a firing (see [`RenewalPolicy`])
/// - `bus_capacity`: event ring buffer size (min 1; clamped)
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Policy applied when the producer fails while renewing.
    pub renewal: RenewalPolicy,

    /// Capacity of the event broadcast ring buffer.
    ///
    /// Receivers lagging by more than this many events get `Lagged` and skip
    /// older items. Ignored when the builder is given an existing bus.
    pub bus_capacity: usize,
}

impl SubscriptionConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SubscriptionConfig {
    /// - `renewal = RenewalPolicy::FailFast`
    /// - `bus_capacity = 64`
    fn default() -> Self {
        Self {
            renewal: RenewalPolicy::default(),
            bus_capacity: 64,
        }
    }
}
