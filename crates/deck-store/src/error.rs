use thiserror::Error;

use crate::{DeckId, Version};

/// Errors that can occur when interacting with the deck store.
#[derive(Debug, Error)]
pub enum DeckStoreError {
    /// No deck matches the identifier. Malformed identifiers land here too.
    #[error("Deck not found: {0}")]
    NotFound(String),

    /// A versioned update lost the race: the expected version did not match
    /// the stored one.
    #[error(
        "Concurrency conflict for deck {deck_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        deck_id: DeckId,
        expected: Version,
        actual: Version,
    },

    /// The deck violates a storage invariant and was not written.
    #[error("Invalid deck record: {0}")]
    InvalidRecord(String),

    /// A stored card code no longer decodes.
    #[error("Corrupt card data for deck {deck_id}: {source}")]
    CorruptCard {
        deck_id: DeckId,
        #[source]
        source: common::CardError,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DeckStoreError {
    /// Returns true if this is the "not found" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeckStoreError::NotFound(_))
    }
}

/// Result type for deck store operations.
pub type Result<T> = std::result::Result<T, DeckStoreError>;
