//! Subscription core: handle, builder, firing path and renewal.
//!
//! The only public API from this module is [`Subscription`] with its builder,
//! config, status and guard.
//!
//! Internal modules:
//! - [`callbacks`]: normalizes producer/consumer closures into shared handles;
//! - [`firing`]: serialized renew → invoke → re-arm sequence;
//! - [`renewal`]: background retry loop for failed renewals;
//! - [`subscription`]: the handle, its status machine and disposal.

mod builder;
mod callbacks;
mod config;
mod firing;
mod renewal;
mod subscription;

#[cfg(test)]
mod tests;

pub use builder::SubscriptionBuilder;
pub use callbacks::{ConsumerOutcome, ConsumerRef, ProducerRef};
pub use config::SubscriptionConfig;
pub use subscription::{Subscription, SubscriptionGuard, SubscriptionStatus};
