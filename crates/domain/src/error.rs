//! Domain error types.

use deck_store::DeckStoreError;
use thiserror::Error;

use crate::deck::DeckError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the deck store.
    #[error("Deck store error: {0}")]
    Store(#[from] DeckStoreError),

    /// The request broke a deck rule.
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
}

impl DomainError {
    /// Returns true if the deck could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::Store(e) if e.is_not_found())
    }
}
