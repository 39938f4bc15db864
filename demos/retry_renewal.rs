//! # Example: retry_renewal
//!
//! Shows how a subscription survives a producer that fails for a while.
//!
//! The producer fails on its 2nd and 3rd calls. With
//! `RenewalPolicy::Retry` the subscription keeps the consumer call for the
//! firing that hit the failure, then retries with backoff until a token is
//! armed again.
//!
//! ## Flow
//! ```text
//! notify #1 ─► producer() Err ─► consumer ─► status=Renewing
//!            ├─► BackoffScheduled{attempt=1, delay≈50ms} ─► producer() Err
//!            ├─► BackoffScheduled{attempt=2, delay≈100ms} ─► producer() Ok
//!            └─► RenewalRecovered ─► Armed
//! notify #2 ─► consumer (chain is live again)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example retry_renewal
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rearm::{
    BackoffPolicy, ChangeSource, JitterPolicy, RenewalPolicy, Subscription, SubscriptionBuilder,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rearm=debug")),
        )
        .init();

    let source = ChangeSource::shared();
    let calls = Arc::new(AtomicU32::new(0));

    // 1. A producer that fails on its 2nd and 3rd call.
    let producer = {
        let source = Arc::clone(&source);
        let calls = Arc::clone(&calls);
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 2 || n == 3 {
                anyhow::bail!("token source unavailable (call #{n})");
            }
            Ok(source.token())
        }
    };

    // 2. Retry with exponential backoff, at most 5 times.
    let backoff = BackoffPolicy {
        first: Duration::from_millis(50),
        max: Duration::from_secs(1),
        factor: 2.0,
        jitter: JitterPolicy::Equal,
    };
    let sub: Subscription<&'static str> = SubscriptionBuilder::new("demo")
        .name("retry_renewal")
        .producer(producer)
        .consumer(|label: &&'static str| println!("[{label}] changed"))
        .with_renewal(RenewalPolicy::retry_bounded(backoff, 5))
        .build()?;

    let mut events = sub.events();
    let printer = tokio::spawn(async move {
        while let Ok(ev) = events.recv().await {
            println!(
                "[event] seq={} kind={:?} attempt={:?} delay_ms={:?}",
                ev.seq, ev.kind, ev.attempt, ev.delay_ms
            );
            if ev.is_terminal() {
                break;
            }
        }
    });

    // 3. First change hits the failing producer.
    source.notify();
    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("status after retries: {:?}", sub.status());

    // 4. The chain is live again.
    source.notify();

    sub.dispose();
    printer.await?;
    Ok(())
}
