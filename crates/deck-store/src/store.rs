use std::collections::HashSet;

use async_trait::async_trait;
use common::Card;

use crate::{DeckId, DeckRecord, DeckStoreError, NewDeck, Result, Version};

/// Most cards a single deck may hold.
pub const MAX_DECK_SIZE: usize = 52;

/// Options for updating a stored deck.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Expected stored version for optimistic concurrency control.
    /// If None, the update always applies and concurrent writers race.
    pub expected_version: Option<Version>,
}

impl UpdateOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the deck to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }
}

/// Core trait for deck persistence.
///
/// Each deck is a single row keyed by its id. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// Persists a new deck, assigning its id, creation time and version 0.
    async fn insert(&self, deck: NewDeck) -> Result<DeckRecord>;

    /// Fetches the current state of a deck.
    ///
    /// Fails with `NotFound` if no deck has this id.
    async fn get(&self, id: DeckId) -> Result<DeckRecord>;

    /// Writes `deck.cards` back and increments the stored version.
    ///
    /// If `options.expected_version` is set, the operation fails with
    /// `ConcurrencyConflict` when the stored version differs.
    ///
    /// Returns the new version.
    async fn update(&self, deck: &DeckRecord, options: UpdateOptions) -> Result<Version>;
}

/// Extension trait providing convenience methods for deck stores.
#[async_trait]
pub trait DeckStoreExt: DeckStore {
    /// Fetches a deck by a client supplied identifier.
    ///
    /// Identifiers that are not UUID-shaped can never match a row and
    /// resolve to `NotFound` like any other miss.
    async fn get_by_key(&self, raw_id: &str) -> Result<DeckRecord> {
        match DeckId::parse(raw_id) {
            Some(id) => self.get(id).await,
            None => Err(DeckStoreError::NotFound(raw_id.to_string())),
        }
    }

    /// Checks if a deck exists.
    async fn exists(&self, id: DeckId) -> Result<bool> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(DeckStoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all DeckStore implementations
impl<T: DeckStore + ?Sized> DeckStoreExt for T {}

/// Checks the card list invariants every stored deck must hold.
pub fn validate_cards_for_write(cards: &[Card]) -> Result<()> {
    if cards.len() > MAX_DECK_SIZE {
        return Err(DeckStoreError::InvalidRecord(format!(
            "deck holds {} cards, at most {MAX_DECK_SIZE} allowed",
            cards.len()
        )));
    }

    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card) {
            return Err(DeckStoreError::InvalidRecord(format!(
                "card {card} appears more than once"
            )));
        }
    }

    Ok(())
}
