use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::Card;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    DeckId, DeckRecord, DeckStoreError, NewDeck, Result, Version,
    store::{DeckStore, UpdateOptions, validate_cards_for_write},
};

/// The only identifier a [`MockDeckStore`] ever resolves.
pub const MOCK_DECK_ID: &str = "9a1d6b2e-3c4f-4e8a-9b7d-5f0c2e1a8d34";

/// Cards held by a fresh [`MockDeckStore`], front first.
pub const MOCK_CARDS: [&str; 7] = ["AS", "KH", "QD", "3H", "5S", "AH", "KS"];

/// Deterministic deck store for tests.
///
/// Holds a single deck under [`MOCK_DECK_ID`]. Inserts overwrite that deck
/// and always hand back the same id; lookups of any other id are `NotFound`.
#[derive(Clone)]
pub struct MockDeckStore {
    deck: Arc<RwLock<DeckRecord>>,
}

impl MockDeckStore {
    /// Creates a mock store holding [`MOCK_CARDS`], unshuffled.
    pub fn new() -> Self {
        let cards = MOCK_CARDS
            .iter()
            .filter_map(|code| Card::decode(code).ok())
            .collect();
        Self::with_cards(false, cards)
    }

    /// Creates a mock store holding the given deck.
    pub fn with_cards(shuffled: bool, cards: Vec<Card>) -> Self {
        Self {
            deck: Arc::new(RwLock::new(Self::record(NewDeck::new(shuffled, cards)))),
        }
    }

    /// Returns the fixed mock id.
    pub fn id() -> DeckId {
        DeckId::from_uuid(Uuid::from_u128(0x9a1d6b2e_3c4f_4e8a_9b7d_5f0c2e1a8d34))
    }

    /// Returns a copy of the held deck.
    pub async fn snapshot(&self) -> DeckRecord {
        self.deck.read().await.clone()
    }

    fn record(deck: NewDeck) -> DeckRecord {
        DeckRecord {
            id: Self::id(),
            shuffled: deck.shuffled,
            cards: deck.cards,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            version: Version::initial(),
        }
    }
}

impl Default for MockDeckStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeckStore for MockDeckStore {
    async fn insert(&self, deck: NewDeck) -> Result<DeckRecord> {
        validate_cards_for_write(&deck.cards)?;

        let record = Self::record(deck);
        *self.deck.write().await = record.clone();
        Ok(record)
    }

    async fn get(&self, id: DeckId) -> Result<DeckRecord> {
        if id != Self::id() {
            return Err(DeckStoreError::NotFound(id.to_string()));
        }
        Ok(self.deck.read().await.clone())
    }

    async fn update(&self, deck: &DeckRecord, options: UpdateOptions) -> Result<Version> {
        if deck.id != Self::id() {
            return Err(DeckStoreError::NotFound(deck.id.to_string()));
        }
        validate_cards_for_write(&deck.cards)?;

        let mut stored = self.deck.write().await;
        if let Some(expected) = options.expected_version
            && stored.version != expected
        {
            return Err(DeckStoreError::ConcurrencyConflict {
                deck_id: deck.id,
                expected,
                actual: stored.version,
            });
        }

        stored.cards = deck.cards.clone();
        stored.version = stored.version.next();
        Ok(stored.version)
    }
}
