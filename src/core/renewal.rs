//! # Renewal retry loop.
//!
//! Spawned on the subscription's runtime when the producer fails during a
//! firing and the policy is [`RenewalPolicy::Retry`](crate::RenewalPolicy).
//! The subscription is `Renewing` while this runs; no token is armed.
//!
//! ```text
//! loop {
//!   ├─► retries exhausted?  ─► abandon (Broken), exit
//!   ├─► delay = delays.next()  (decorrelated jitter sees the previous delay)
//!   ├─► publish BackoffScheduled{ attempt, delay }
//!   ├─► sleep(delay)        (cancellable: dispose() exits immediately)
//!   └─► producer()
//!         ├─ Ok  ─► Renewing → Active, publish RenewalRecovered, arm, exit
//!         └─ Err ─► remember error, continue
//! }
//! ```

use std::sync::Arc;

use tokio::{select, time};
use tracing::{info, warn};

use crate::{
    core::subscription::{Inner, SubscriptionStatus},
    error::BoxError,
    events::{Event, EventKind},
    policies::BackoffPolicy,
};

pub(crate) async fn retry<S: Send + Sync + 'static>(
    inner: Arc<Inner<S>>,
    backoff: BackoffPolicy,
    max_attempts: Option<u32>,
    first_error: BoxError,
) {
    let mut last_error = first_error;
    let mut retries: u32 = 0;
    let mut delays = backoff.delays();

    loop {
        if max_attempts.is_some_and(|max| retries >= max) {
            inner.abandon(retries + 1, &last_error);
            return;
        }

        retries += 1;
        let delay = delays.next().unwrap_or(backoff.max);
        warn!(
            subscription = %inner.name,
            attempt = retries,
            delay_ms = delay.as_millis() as u64,
            error = %last_error,
            "producer failed; renewal retry scheduled"
        );
        inner.bus.publish(
            Event::new(EventKind::BackoffScheduled)
                .with_subscription(Arc::clone(&inner.name))
                .with_attempt(retries)
                .with_delay(delay)
                .with_reason(last_error.to_string()),
        );

        let sleep = time::sleep(delay);
        tokio::pin!(sleep);
        select! {
            _ = &mut sleep => {}
            _ = inner.cancel.cancelled() => { return; }
        }

        match inner.produce() {
            Ok(token) => {
                if !inner.transition(SubscriptionStatus::Renewing, SubscriptionStatus::Active) {
                    return;
                }
                info!(subscription = %inner.name, attempt = retries, "renewal recovered");
                inner.bus.publish(
                    Event::new(EventKind::RenewalRecovered)
                        .with_subscription(Arc::clone(&inner.name))
                        .with_attempt(retries),
                );
                inner.arm(token);
                return;
            }
            Err(e) => last_error = e,
        }
    }
}
