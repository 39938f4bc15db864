use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    core::{
        callbacks::{consumer_ref, producer_ref, ConsumerOutcome, ConsumerRef, ProducerRef},
        config::SubscriptionConfig,
        subscription::{Inner, Subscription},
    },
    error::{BoxError, SubscriptionError},
    events::Bus,
    policies::RenewalPolicy,
    tokens::ChangeToken,
};

/// Builder for a [`Subscription`] over state `S`.
///
/// Producer and consumer are required; [`build`](Self::build) fails with
/// [`SubscriptionError::InvalidArgument`] if either is missing, before anything
/// is called or registered.
///
/// # Example
/// ```rust
/// use rearm::{ChangeSource, Subscription, SubscriptionBuilder, SubscriptionError};
///
/// let source = ChangeSource::shared();
/// let sub = SubscriptionBuilder::new(String::from("settings.toml"))
///     .name("settings")
///     .producer(source.producer())
///     .consumer(|path: &String| println!("{path} changed"))
///     .build()
///     .unwrap();
/// assert_eq!(sub.name(), "settings");
///
/// let err = Subscription::builder().producer(source.producer()).build().unwrap_err();
/// assert!(matches!(err, SubscriptionError::InvalidArgument { name: "consumer" }));
/// ```
pub struct SubscriptionBuilder<S = ()> {
    name: Option<Arc<str>>,
    producer: Option<ProducerRef>,
    consumer: Option<ConsumerRef<S>>,
    state: S,
    cfg: SubscriptionConfig,
    bus: Option<Bus>,
    runtime: Option<Handle>,
}

impl<S: Send + Sync + 'static> SubscriptionBuilder<S> {
    /// Creates a builder carrying the state passed to every consumer call.
    pub fn new(state: S) -> Self {
        Self {
            name: None,
            producer: None,
            consumer: None,
            state,
            cfg: SubscriptionConfig::default(),
            bus: None,
            runtime: None,
        }
    }

    /// Names the subscription for logs and events (default: `"subscription"`).
    pub fn name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the token producer.
    pub fn producer<P, T, E>(mut self, producer: P) -> Self
    where
        P: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: ChangeToken + 'static,
        E: Into<BoxError>,
    {
        self.producer = Some(producer_ref(producer));
        self
    }

    /// Sets an already shared producer (the caller keeps its own handle).
    pub fn shared_producer(mut self, producer: ProducerRef) -> Self {
        self.producer = Some(producer);
        self
    }

    /// Sets the consumer invoked with `&state` on every firing.
    pub fn consumer<F, R>(mut self, consumer: F) -> Self
    where
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: ConsumerOutcome,
    {
        self.consumer = Some(consumer_ref(consumer));
        self
    }

    /// Sets an already shared consumer.
    pub fn shared_consumer(mut self, consumer: ConsumerRef<S>) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: SubscriptionConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the renewal policy.
    pub fn with_renewal(mut self, renewal: RenewalPolicy) -> Self {
        self.cfg.renewal = renewal;
        self
    }

    /// Publishes events to an existing bus (e.g. one shared by several subscriptions).
    ///
    /// Subscribe to it before `build()` to observe the initial `Armed` event.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Runtime used for renewal retries. Defaults to the current runtime, if any.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Validates the arguments, obtains the first token and arms it.
    ///
    /// ### Errors
    /// - `InvalidArgument` if producer or consumer is missing;
    /// - `NoRuntime` if the renewal policy retries and no runtime is available;
    /// - `Producer` if the first `producer()` call fails.
    ///
    /// The first token may fire synchronously during registration, in which
    /// case the consumer runs before `build()` returns.
    pub fn build(self) -> Result<Subscription<S>, SubscriptionError> {
        let producer = self
            .producer
            .ok_or(SubscriptionError::InvalidArgument { name: "producer" })?;
        let consumer = self
            .consumer
            .ok_or(SubscriptionError::InvalidArgument { name: "consumer" })?;

        let runtime = if self.cfg.renewal.needs_runtime() {
            let handle = self
                .runtime
                .or_else(|| Handle::try_current().ok())
                .ok_or(SubscriptionError::NoRuntime)?;
            Some(handle)
        } else {
            None
        };

        let bus = self
            .bus
            .unwrap_or_else(|| Bus::new(self.cfg.bus_capacity_clamped()));
        let name = self.name.unwrap_or_else(|| Arc::from("subscription"));

        let inner = Arc::new(Inner::new(
            name, producer, consumer, self.state, self.cfg, bus, runtime,
        ));

        let token = inner
            .produce()
            .map_err(|error| SubscriptionError::Producer { attempts: 1, error })?;
        inner.arm(token);

        Ok(Subscription { inner })
    }
}
