//! Change tokens: the one-shot notifications a subscription renews.
//!
//! ## Contents
//! - [`ChangeToken`], [`ChangeCallback`], [`TokenRef`] the token contract
//! - [`TriggerToken`] explicitly fired token; [`ChangeSource`] source that
//!   re-arms one on every `notify()`
//! - [`CompositeToken`] first-of-many combinator
//!
//! Any type implementing [`ChangeToken`] can be returned by a producer; the
//! types here cover tests, manual triggers and fan-in.

mod composite;
mod token;
mod trigger;

pub use composite::CompositeToken;
pub use token::{ChangeCallback, ChangeToken, TokenRef};
pub use trigger::{ChangeSource, TriggerToken};

pub(crate) use trigger::panic_message;
