//! Error types used by subscriptions and token dispatchers.
//!
//! - [`SubscriptionError`] — everything a subscription can report: bad
//!   construction arguments, producer failures, consumer failures.
//! - [`BoxError`] — the type-erased error that producers and consumers return.
//!
//! [`SubscriptionError`] provides helper methods (`as_label`, `as_message`) for
//! logs/events, same as the rest of the crate's observability surface.

use thiserror::Error;

/// Type-erased error returned by producers and consumers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by a subscription.
///
/// Construction errors (`InvalidArgument`, `NoRuntime`, and a failing first
/// `Producer` call) are returned synchronously from the builder.
/// Firing errors (`Consumer`, `Producer`) are returned to whatever dispatched
/// the token callback, **after** the next token has been armed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SubscriptionError {
    /// A required argument was not supplied.
    #[error("invalid argument: `{name}` is required")]
    InvalidArgument {
        /// Name of the missing argument (`"producer"` or `"consumer"`).
        name: &'static str,
    },

    /// The token producer failed; the renewal chain could not continue.
    #[error("producer failed after {attempts} attempt(s): {error}")]
    Producer {
        /// How many times the producer was called for this renewal.
        attempts: u32,
        /// The last producer error.
        #[source]
        error: BoxError,
    },

    /// The consumer callback returned an error (the next token is already armed).
    #[error("consumer failed: {error}")]
    Consumer {
        /// The consumer's error.
        #[source]
        error: BoxError,
    },

    /// The renewal policy schedules retries but no tokio runtime is available.
    #[error("renewal retries require a tokio runtime")]
    NoRuntime,
}

impl SubscriptionError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use rearm::SubscriptionError;
    ///
    /// let err = SubscriptionError::InvalidArgument { name: "producer" };
    /// assert_eq!(err.as_label(), "invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriptionError::InvalidArgument { .. } => "invalid_argument",
            SubscriptionError::Producer { .. } => "producer_failed",
            SubscriptionError::Consumer { .. } => "consumer_failed",
            SubscriptionError::NoRuntime => "no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscriptionError::InvalidArgument { name } => format!("missing: {name}"),
            SubscriptionError::Producer { attempts, error } => {
                format!("producer: {error} (attempts={attempts})")
            }
            SubscriptionError::Consumer { error } => format!("consumer: {error}"),
            SubscriptionError::NoRuntime => "no tokio runtime".to_string(),
        }
    }

    /// Indicates whether the error broke the renewal chain.
    ///
    /// # Example
    /// ```
    /// use rearm::SubscriptionError;
    ///
    /// let broken = SubscriptionError::Producer { attempts: 1, error: "gone".into() };
    /// assert!(broken.is_renewal_failure());
    ///
    /// let consumer = SubscriptionError::Consumer { error: "boom".into() };
    /// assert!(!consumer.is_renewal_failure());
    /// ```
    pub fn is_renewal_failure(&self) -> bool {
        matches!(self, SubscriptionError::Producer { .. })
    }
}
