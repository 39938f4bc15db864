//! Type-erased producer and consumer handles.
//!
//! Callers pass ordinary closures to the builder; they are normalized here into
//! the shapes the firing path works with:
//! - producer: `Fn() -> Result<T, E>` → [`ProducerRef`]
//! - consumer: `Fn(&S) -> ()` or `Fn(&S) -> Result<(), E>` → [`ConsumerRef`]

use std::sync::Arc;

use crate::error::BoxError;
use crate::tokens::{ChangeToken, TokenRef};

/// Shared token producer.
pub type ProducerRef = Arc<dyn Fn() -> Result<TokenRef, BoxError> + Send + Sync + 'static>;

/// Shared consumer callback over state `S`.
pub type ConsumerRef<S> = Arc<dyn Fn(&S) -> Result<(), BoxError> + Send + Sync + 'static>;

/// Return types accepted from a consumer.
///
/// Implemented for `()` (infallible consumers) and `Result<(), E>`.
pub trait ConsumerOutcome {
    fn into_result(self) -> Result<(), BoxError>;
}

impl ConsumerOutcome for () {
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> ConsumerOutcome for Result<(), E> {
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

pub(crate) fn producer_ref<F, T, E>(f: F) -> ProducerRef
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    T: ChangeToken + 'static,
    E: Into<BoxError>,
{
    Arc::new(move || match f() {
        Ok(token) => Ok(Arc::new(token) as TokenRef),
        Err(e) => Err(e.into()),
    })
}

pub(crate) fn consumer_ref<S, F, R>(f: F) -> ConsumerRef<S>
where
    F: Fn(&S) -> R + Send + Sync + 'static,
    R: ConsumerOutcome,
{
    Arc::new(move |state: &S| f(state).into_result())
}
