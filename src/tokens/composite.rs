//! # Composite token: fires on the first of several tokens.
//!
//! Useful when one subscription should react to several sources (two
//! directories, a file plus a manual reload trigger). A callback registered on a
//! [`CompositeToken`] is registered on every inner token but runs only once,
//! on whichever inner token fires first.

use std::sync::{Arc, Mutex, PoisonError};

use crate::tokens::token::{ChangeCallback, ChangeToken, TokenRef};

/// Token that has changed as soon as any of its inner tokens has.
pub struct CompositeToken {
    tokens: Vec<TokenRef>,
}

impl CompositeToken {
    #[must_use]
    pub fn new(tokens: Vec<TokenRef>) -> Self {
        Self { tokens }
    }

    /// Inner tokens, in registration order.
    pub fn tokens(&self) -> &[TokenRef] {
        &self.tokens
    }
}

impl ChangeToken for CompositeToken {
    fn has_changed(&self) -> bool {
        self.tokens.iter().any(|t| t.has_changed())
    }

    fn register_change_callback(&self, callback: ChangeCallback) {
        let slot = Arc::new(Mutex::new(Some(callback)));
        for token in &self.tokens {
            let slot = Arc::clone(&slot);
            token.register_change_callback(Box::new(move || {
                let taken = slot
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                match taken {
                    Some(callback) => callback(),
                    None => Ok(()),
                }
            }));
        }
    }
}
