use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;

use crate::{
    BackoffPolicy, BoxError, Bus, ChangeCallback, ChangeSource, ChangeToken, ConsumerRef,
    EventKind, JitterPolicy, ProducerRef, RenewalPolicy, Subscription, SubscriptionBuilder,
    SubscriptionConfig, SubscriptionError, SubscriptionStatus, TokenRef,
};

/// Token fired by hand; returns the callback result to the test (the dispatcher).
struct ManualToken {
    slot: Mutex<Option<ChangeCallback>>,
    fired: AtomicBool,
}

impl ManualToken {
    fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            fired: AtomicBool::new(false),
        }
    }

    fn fired() -> Self {
        let t = Self::new();
        t.fired.store(true, Ordering::SeqCst);
        t
    }

    fn is_armed(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    /// Fires the token; `None` if nothing was registered.
    fn fire(&self) -> Option<Result<(), SubscriptionError>> {
        self.fired.store(true, Ordering::SeqCst);
        let cb = self.slot.lock().unwrap().take();
        cb.map(|cb| cb())
    }
}

impl ChangeToken for ManualToken {
    fn has_changed(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    fn register_change_callback(&self, callback: ChangeCallback) {
        if self.has_changed() {
            let _ = callback();
            return;
        }
        *self.slot.lock().unwrap() = Some(callback);
    }
}

/// Producer test double: records calls, hands out `ManualToken`s, fails on demand.
#[derive(Default)]
struct Script {
    tokens: Mutex<Vec<Arc<ManualToken>>>,
    log: Mutex<Vec<String>>,
    /// 1-based producer call numbers that fail.
    fail_on: Mutex<Vec<usize>>,
    /// 1-based producer call numbers that return an already-fired token.
    fired_on: Vec<usize>,
}

impl Script {
    fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_fired(fired_on: Vec<usize>) -> Arc<Self> {
        Arc::new(Self {
            fired_on,
            ..Self::default()
        })
    }

    fn failing_on(self: &Arc<Self>, calls: &[usize]) {
        self.fail_on.lock().unwrap().extend_from_slice(calls);
    }

    fn calls(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("produce"))
            .count()
    }

    fn token(&self, i: usize) -> Arc<ManualToken> {
        Arc::clone(&self.tokens.lock().unwrap()[i])
    }

    fn last(&self) -> Arc<ManualToken> {
        Arc::clone(self.tokens.lock().unwrap().last().expect("no tokens"))
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }

    fn producer(
        self: &Arc<Self>,
    ) -> impl Fn() -> Result<Arc<ManualToken>, SubscriptionError> + Send + Sync + 'static {
        let script = Arc::clone(self);
        move || {
            let n = script.calls() + 1;
            script.record(format!("produce#{n}"));
            if script.fail_on.lock().unwrap().contains(&n) {
                return Err(SubscriptionError::InvalidArgument { name: "scripted" });
            }
            let token = if script.fired_on.contains(&n) {
                Arc::new(ManualToken::fired())
            } else {
                Arc::new(ManualToken::new())
            };
            script.tokens.lock().unwrap().push(Arc::clone(&token));
            Ok(token)
        }
    }
}

fn recording_consumer(script: &Arc<Script>) -> impl Fn() + Send + Sync + 'static {
    let s = Arc::clone(script);
    move || s.record("consume")
}

#[test]
fn test_construction_arms_first_token() {
    let script = Script::shared();
    let sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();

    assert_eq!(script.log(), vec!["produce#1"]);
    assert!(script.token(0).is_armed());
    assert_eq!(sub.status(), SubscriptionStatus::Active);
    assert_eq!(sub.armed_tokens(), 1);
    assert_eq!(sub.firings(), 0);
}

#[test]
fn test_every_firing_invokes_consumer_once_in_order() {
    let script = Script::shared();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let sub = Subscription::on_change(script.producer(), move || {
        let n = c.fetch_add(1, Ordering::SeqCst) + 1;
        s.lock().unwrap().push(n);
    })
    .unwrap();

    for _ in 0..10 {
        assert!(script.last().fire().expect("armed").is_ok());
    }

    assert_eq!(*seen.lock().unwrap(), (1..=10).collect::<Vec<_>>());
    assert_eq!(sub.firings(), 10);
    assert_eq!(sub.armed_tokens(), 11);
}

#[test]
fn test_next_token_is_produced_before_consumer_runs() {
    let script = Script::shared();
    let _sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();

    script.token(0).fire();
    script.token(1).fire();

    assert_eq!(
        script.log(),
        vec!["produce#1", "produce#2", "consume", "produce#3", "consume"]
    );
    assert!(!script.token(0).is_armed());
    assert!(!script.token(1).is_armed());
    assert!(script.token(2).is_armed());
    assert_eq!(script.calls(), 3);
}

#[test]
fn test_consumer_error_is_returned_after_rearm() {
    let script = Script::shared();
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let sub = Subscription::on_change(script.producer(), move || {
        if c.fetch_add(1, Ordering::SeqCst) == 0 {
            Err("first change is bad")
        } else {
            Ok(())
        }
    })
    .unwrap();

    let first = script.token(0).fire().expect("armed");
    match first {
        Err(SubscriptionError::Consumer { error }) => {
            assert_eq!(error.to_string(), "first change is bad")
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(script.token(1).is_armed());

    assert!(script.token(1).fire().expect("armed").is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(sub.status(), SubscriptionStatus::Active);
}

#[test]
fn test_consumer_panic_resumes_after_rearm() {
    let script = Script::shared();
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let _sub = Subscription::on_change(script.producer(), move || {
        if c.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("consumer exploded");
        }
    })
    .unwrap();

    let t0 = script.token(0);
    let res = catch_unwind(AssertUnwindSafe(|| t0.fire()));
    assert!(res.is_err());
    assert!(script.token(1).is_armed());

    assert!(script.token(1).fire().expect("armed").is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(script.token(2).is_armed());
}

#[test]
fn test_missing_arguments_fail_without_registration() {
    let script = Script::shared();

    let err = Subscription::builder()
        .consumer(|_: &()| ())
        .build()
        .unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidArgument { name: "producer" }));

    let err = Subscription::builder()
        .producer(script.producer())
        .build()
        .unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidArgument { name: "consumer" }));
    assert_eq!(script.calls(), 0);
}

#[test]
fn test_state_is_passed_unchanged() {
    let script = Script::shared();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let sub = Subscription::with_state(
        script.producer(),
        move |state: &(u32, &'static str)| s.lock().unwrap().push(*state),
        (7, "config.json"),
    )
    .unwrap();

    for _ in 0..3 {
        script.last().fire();
    }

    assert_eq!(*seen.lock().unwrap(), vec![(7, "config.json"); 3]);
    assert_eq!(sub.state(), &(7, "config.json"));
}

#[test]
fn test_dispose_stops_observation() {
    let script = Script::shared();
    let sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();
    script.last().fire();

    assert!(sub.dispose());
    assert!(!sub.dispose());
    assert_eq!(sub.status(), SubscriptionStatus::Disposed);

    // The armed token still fires, but the handler is inert.
    assert!(script.last().fire().expect("armed").is_ok());
    assert_eq!(
        script.log(),
        vec!["produce#1", "produce#2", "consume"],
        "no renewal or consumer call after dispose"
    );
}

#[test]
fn test_dispose_from_consumer_skips_rearm() {
    let script = Script::shared();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let handle = Arc::clone(&slot);
    let sub = Subscription::on_change(script.producer(), move || {
        if let Some(sub) = handle.lock().unwrap().as_ref() {
            sub.dispose();
        }
    })
    .unwrap();
    *slot.lock().unwrap() = Some(sub.clone());

    script.token(0).fire();

    assert_eq!(script.calls(), 2);
    assert!(!script.token(1).is_armed());
    assert_eq!(sub.armed_tokens(), 1);
    assert_eq!(sub.status(), SubscriptionStatus::Disposed);
    slot.lock().unwrap().take();
}

#[test]
fn test_guard_disposes_on_drop() {
    let source = ChangeSource::shared();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let guard = Subscription::on_change(source.producer(), move || {
        h.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap()
    .guard();

    source.notify();
    let observer = (*guard).clone();
    drop(guard);
    source.notify();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(observer.status(), SubscriptionStatus::Disposed);
}

#[test]
fn test_guard_into_inner_keeps_observing() {
    let source = ChangeSource::shared();
    let sub = Subscription::on_change(source.producer(), || ())
        .unwrap()
        .guard()
        .into_inner();

    source.notify();
    assert_eq!(sub.status(), SubscriptionStatus::Active);
    assert_eq!(sub.firings(), 1);
}

#[test]
fn test_fail_fast_skips_consumer_and_breaks_chain() {
    let script = Script::shared();
    script.failing_on(&[2]);
    let sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();
    let mut rx = sub.events();

    let res = script.token(0).fire().expect("armed");
    match res {
        Err(SubscriptionError::Producer { attempts: 1, .. }) => {}
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(script.log(), vec!["produce#1", "produce#2"]);
    assert_eq!(sub.status(), SubscriptionStatus::Broken);
    assert!(!sub.is_observing());
    assert_eq!(sub.firings(), 1);
    assert_eq!(sub.armed_tokens(), 1);

    let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|ev| ev.kind)
        .collect();
    assert_eq!(kinds, vec![EventKind::Fired, EventKind::RenewalAbandoned]);
}

#[test]
fn test_dispose_during_renewal_skips_consumer_and_arming() {
    let script = Script::shared();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let handle = Arc::clone(&slot);
    let produce = script.producer();
    let sub = Subscription::on_change(
        move || {
            let token = produce();
            let current = handle.lock().unwrap().clone();
            if let Some(sub) = current {
                sub.dispose();
            }
            token
        },
        recording_consumer(&script),
    )
    .unwrap();
    *slot.lock().unwrap() = Some(sub.clone());

    assert!(script.token(0).fire().expect("armed").is_ok());

    assert_eq!(script.log(), vec!["produce#1", "produce#2"]);
    assert_eq!(sub.armed_tokens(), 1);
    assert!(!script.token(1).is_armed());
    assert_eq!(sub.status(), SubscriptionStatus::Disposed);
    slot.lock().unwrap().take();
}

#[test]
fn test_initial_producer_failure_fails_build() {
    let script = Script::shared();
    script.failing_on(&[1]);
    let err = Subscription::on_change(script.producer(), || ()).unwrap_err();
    assert!(err.is_renewal_failure());
}

#[test]
fn test_producer_panic_counts_as_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let err = Subscription::on_change(
        move || -> Result<ManualToken, SubscriptionError> {
            c.fetch_add(1, Ordering::SeqCst);
            panic!("watcher gone")
        },
        || (),
    )
    .unwrap_err();
    assert!(err.to_string().contains("producer panicked: watcher gone"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reentrant_firings_are_processed_iteratively() {
    // Calls 2 and 3 return tokens that are already signaled.
    let script = Script::with_fired(vec![2, 3]);
    let sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();

    assert!(script.token(0).fire().expect("armed").is_ok());

    assert_eq!(
        script.log(),
        vec![
            "produce#1", "produce#2", "consume", "produce#3", "consume", "produce#4", "consume",
        ]
    );
    assert_eq!(sub.firings(), 3);
    assert!(script.token(3).is_armed());
}

#[test]
fn test_already_signaled_first_token_fires_during_build() {
    let script = Script::with_fired(vec![1]);
    let sub = Subscription::on_change(script.producer(), recording_consumer(&script)).unwrap();

    assert_eq!(script.log(), vec!["produce#1", "produce#2", "consume"]);
    assert_eq!(sub.firings(), 1);
    assert!(script.token(1).is_armed());
}

#[test]
fn test_concurrent_notifications_never_overlap_consumer() {
    let source = ChangeSource::shared();
    let busy = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let (b, o, c) = (Arc::clone(&busy), Arc::clone(&overlaps), Arc::clone(&calls));
    let sub = Subscription::on_change(source.producer(), move || {
        if b.swap(true, Ordering::SeqCst) {
            o.fetch_add(1, Ordering::SeqCst);
        }
        c.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        b.store(false, Ordering::SeqCst);
    })
    .unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            thread::spawn(move || {
                for _ in 0..200 {
                    source.notify();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst) as u64, sub.firings());
    assert!(sub.firings() > 0);
    assert_eq!(sub.status(), SubscriptionStatus::Active);
}

#[test]
fn test_events_follow_the_chain() {
    let script = Script::shared();
    let bus = Bus::new(16);
    let mut rx = bus.subscribe();
    let _sub = Subscription::builder()
        .name("chain")
        .with_bus(bus)
        .producer(script.producer())
        .consumer(|_: &()| Err::<(), _>("nope"))
        .build()
        .unwrap();

    script.token(0).fire();

    let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|ev| {
            assert_eq!(ev.subscription.as_deref(), Some("chain"));
            ev.kind
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Armed,
            EventKind::Fired,
            EventKind::Armed,
            EventKind::ConsumerFailed
        ]
    );
}

#[test]
fn test_retry_policy_requires_runtime() {
    let script = Script::shared();
    let err = SubscriptionBuilder::new(())
        .producer(script.producer())
        .consumer(|_: &()| ())
        .with_renewal(RenewalPolicy::retry(BackoffPolicy::default()))
        .build()
        .unwrap_err();
    assert!(matches!(err, SubscriptionError::NoRuntime));
    assert_eq!(script.calls(), 0);
}

#[test]
fn test_shared_producer_can_be_called_outside_the_chain() {
    let script = Script::shared();
    let produce = script.producer();
    let producer: ProducerRef = Arc::new(move || {
        produce()
            .map(|token| -> TokenRef { token })
            .map_err(BoxError::from)
    });
    let sub = Subscription::builder()
        .shared_producer(Arc::clone(&producer))
        .consumer({
            let s = Arc::clone(&script);
            move |_: &()| s.record("consume")
        })
        .build()
        .unwrap();

    let extra = producer().unwrap();
    assert!(!extra.has_changed());

    assert!(script.token(0).fire().expect("armed").is_ok());
    assert_eq!(
        script.log(),
        vec!["produce#1", "produce#2", "produce#3", "consume"]
    );
    assert_eq!(sub.firings(), 1);
    assert!(!script.token(1).is_armed(), "caller's token is left alone");
    assert!(script.token(2).is_armed());
    assert_eq!(sub.status(), SubscriptionStatus::Active);
}

#[test]
fn test_shared_consumer_serves_several_subscriptions() {
    let source = ChangeSource::shared();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let consumer: ConsumerRef<()> = Arc::new(move |_: &()| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let subs: Vec<Subscription> = (0..2)
        .map(|i| {
            Subscription::builder()
                .name(format!("shared-{i}"))
                .producer(source.producer())
                .shared_consumer(Arc::clone(&consumer))
                .build()
                .unwrap()
        })
        .collect();

    source.notify();
    source.notify();

    assert_eq!(hits.load(Ordering::SeqCst), 4);
    assert!(subs.iter().all(|sub| sub.firings() == 2));
}

#[test]
fn test_explicit_runtime_runs_retries_outside_runtime_context() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let script = Script::shared();
    script.failing_on(&[2]);
    let sub = Subscription::builder()
        .producer(script.producer())
        .consumer(|_: &()| ())
        .with_renewal(RenewalPolicy::retry(BackoffPolicy::constant(
            Duration::from_millis(1),
        )))
        .with_runtime(rt.handle().clone())
        .build()
        .unwrap();

    script.token(0).fire();
    assert_eq!(sub.status(), SubscriptionStatus::Renewing);

    rt.block_on(async {
        for _ in 0..200 {
            if sub.status() == SubscriptionStatus::Active {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    assert_eq!(sub.status(), SubscriptionStatus::Active);
    assert_eq!(script.calls(), 3);
    assert!(script.token(1).is_armed());
}

fn retrying(script: &Arc<Script>, max_attempts: Option<u32>) -> Subscription {
    Subscription::builder()
        .name("retrying")
        .producer(script.producer())
        .consumer({
            let s = Arc::clone(script);
            move |_: &()| s.record("consume")
        })
        .with_renewal(RenewalPolicy::Retry {
            backoff: BackoffPolicy::constant(Duration::from_millis(10)),
            max_attempts,
        })
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_retry_recovers_after_transient_failures() {
    let script = Script::shared();
    script.failing_on(&[2, 3]);
    let sub = retrying(&script, Some(5));
    let mut rx = sub.events();

    assert!(script.token(0).fire().expect("armed").is_ok());
    assert_eq!(sub.status(), SubscriptionStatus::Renewing);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(sub.status(), SubscriptionStatus::Active);
    assert_eq!(script.calls(), 4);
    assert!(script.last().is_armed());

    script.last().fire();
    assert_eq!(
        script.log().iter().filter(|e| *e == "consume").count(),
        2,
        "consumer ran for both firings"
    );

    let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|ev| ev.kind)
        .collect();
    assert!(kinds.contains(&EventKind::BackoffScheduled));
    assert!(kinds.contains(&EventKind::RenewalRecovered));
}

#[tokio::test(start_paused = true)]
async fn test_retry_gives_up_after_max_attempts() {
    let script = Script::shared();
    script.failing_on(&[2, 3, 4, 5]);
    let sub = retrying(&script, Some(2));
    let mut rx = sub.events();

    script.token(0).fire();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(sub.status(), SubscriptionStatus::Broken);
    assert_eq!(script.calls(), 4, "initial + failing renewal + 2 retries");

    let abandoned = std::iter::from_fn(|| rx.try_recv().ok())
        .find(|ev| ev.kind == EventKind::RenewalAbandoned)
        .expect("abandoned event");
    assert_eq!(abandoned.attempt, Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_retry() {
    let script = Script::shared();
    script.failing_on(&[2]);
    let sub = retrying(&script, None);

    script.token(0).fire();
    assert_eq!(sub.status(), SubscriptionStatus::Renewing);
    assert!(sub.dispose());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sub.status(), SubscriptionStatus::Disposed);
    assert_eq!(script.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_config_sets_renewal_and_bus_capacity() {
    let script = Script::shared();
    script.failing_on(&[2]);
    let sub = Subscription::builder()
        .producer(script.producer())
        .consumer(|_: &()| ())
        .with_config(SubscriptionConfig {
            renewal: RenewalPolicy::retry(BackoffPolicy::constant(Duration::from_millis(10))),
            bus_capacity: 1,
        })
        .build()
        .unwrap();
    let mut rx = sub.events();

    script.token(0).fire();
    assert_eq!(sub.status(), SubscriptionStatus::Renewing);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sub.status(), SubscriptionStatus::Active);

    // Fired, BackoffScheduled, RenewalRecovered, Armed through a one-slot ring.
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(3))));
    assert_eq!(rx.try_recv().map(|ev| ev.kind).ok(), Some(EventKind::Armed));
}

#[tokio::test(start_paused = true)]
async fn test_decorrelated_retry_delays_follow_previous_delay() {
    let script = Script::shared();
    script.failing_on(&[2, 3, 4, 5, 6, 7]);
    let sub = Subscription::builder()
        .producer(script.producer())
        .consumer(|_: &()| ())
        .with_renewal(RenewalPolicy::retry(BackoffPolicy {
            first: Duration::from_millis(10),
            max: Duration::from_secs(60),
            factor: 2.0,
            jitter: JitterPolicy::Decorrelated,
        }))
        .build()
        .unwrap();
    let mut rx = sub.events();

    script.token(0).fire();
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(sub.status(), SubscriptionStatus::Active);

    let delays: Vec<u32> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter(|ev| ev.kind == EventKind::BackoffScheduled)
        .filter_map(|ev| ev.delay_ms)
        .collect();
    assert_eq!(delays.len(), 6);

    // Millisecond truncation allows up to 2ms over `3 × prev`.
    let mut prev = 10;
    for delay in delays {
        assert!(delay >= 10, "{delay}ms below floor");
        assert!(delay <= prev * 3 + 2, "{delay}ms after {prev}ms");
        prev = delay;
    }
}
