use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    DeckId, DeckRecord, DeckStoreError, NewDeck, Result, Version,
    store::{DeckStore, UpdateOptions, validate_cards_for_write},
};

/// In-memory deck store.
///
/// Stores every deck in a map and provides the same interface as the
/// PostgreSQL implementation. Used when no database is configured and in
/// tests.
#[derive(Clone, Default)]
pub struct InMemoryDeckStore {
    decks: Arc<RwLock<HashMap<DeckId, DeckRecord>>>,
}

impl InMemoryDeckStore {
    /// Creates a new empty in-memory deck store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored decks.
    pub async fn deck_count(&self) -> usize {
        self.decks.read().await.len()
    }

    /// Removes every deck.
    pub async fn clear(&self) {
        self.decks.write().await.clear();
    }
}

#[async_trait]
impl DeckStore for InMemoryDeckStore {
    async fn insert(&self, deck: NewDeck) -> Result<DeckRecord> {
        validate_cards_for_write(&deck.cards)?;

        let record = DeckRecord::from_new(DeckId::new(), deck);
        self.decks.write().await.insert(record.id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: DeckId) -> Result<DeckRecord> {
        self.decks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DeckStoreError::NotFound(id.to_string()))
    }

    async fn update(&self, deck: &DeckRecord, options: UpdateOptions) -> Result<Version> {
        validate_cards_for_write(&deck.cards)?;

        let mut decks = self.decks.write().await;
        let stored = decks
            .get_mut(&deck.id)
            .ok_or_else(|| DeckStoreError::NotFound(deck.id.to_string()))?;

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

#[cfg(test)]
mod tests {
    use common::Card;

    use super::*;
    use crate::DeckStoreExt;

    fn cards(codes: &[&str]) -> Vec<common::Card> {
        codes.iter().map(|c| Card::decode(c).unwrap()).collect()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_initial_version() {
        let store = InMemoryDeckStore::new();

        let record = store
            .insert(NewDeck::new(false, cards(&["AS", "4D"])))
            .await
            .unwrap();

        assert_eq!(record.version, Version::initial());
        assert_eq!(record.cards, cards(&["AS", "4D"]));
        assert_eq!(store.deck_count().await, 1);
    }

    #[tokio::test]
    async fn each_insert_gets_a_fresh_id() {
        let store = InMemoryDeckStore::new();

        let a = store.insert(NewDeck::new(false, vec![])).await.unwrap();
        let b = store.insert(NewDeck::new(false, vec![])).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.deck_count().await, 2);
    }

    #[tokio::test]
    async fn get_returns_stored_deck() {
        let store = InMemoryDeckStore::new();
        let inserted = store
            .insert(NewDeck::new(true, cards(&["KC", "3H", "QS"])))
            .await
            .unwrap();

        let fetched = store.get(inserted.id).await.unwrap();
        assert_eq!(fetched, inserted);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = InMemoryDeckStore::new();
        let result = store.get(DeckId::new()).await;
        assert!(matches!(result, Err(DeckStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_by_malformed_key_is_not_found() {
        let store = InMemoryDeckStore::new();
        let result = store.get_by_key("wrongid").await;
        assert!(matches!(result, Err(DeckStoreError::NotFound(id)) if id == "wrongid"));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_cards() {
        let store = InMemoryDeckStore::new();
        let result = store.insert(NewDeck::new(false, cards(&["AS", "AS"]))).await;
        assert!(matches!(result, Err(DeckStoreError::InvalidRecord(_))));
        assert_eq!(store.deck_count().await, 0);
    }

    #[tokio::test]
    async fn update_persists_cards_and_bumps_version() {
        let store = InMemoryDeckStore::new();
        let mut record = store
            .insert(NewDeck::new(false, cards(&["AC", "KH", "QD"])))
            .await
            .unwrap();

        record.cards.remove(0);
        let version = store.update(&record, UpdateOptions::new()).await.unwrap();
        assert_eq!(version, Version::new(1));

        let fetched = store.get(record.id).await.unwrap();
        assert_eq!(fetched.cards, cards(&["KH", "QD"]));
        assert_eq!(fetched.version, Version::new(1));
    }

    #[tokio::test]
    async fn unchecked_updates_always_apply() {
        let store = InMemoryDeckStore::new();
        let record = store
            .insert(NewDeck::new(false, cards(&["AC", "KH"])))
            .await
            .unwrap();

        // Both writers read version 0; without a version check the last one wins.
        store.update(&record, UpdateOptions::new()).await.unwrap();
        let version = store.update(&record, UpdateOptions::new()).await.unwrap();
        assert_eq!(version, Version::new(2));
    }

    #[tokio::test]
    async fn versioned_update_detects_conflict() {
        let store = InMemoryDeckStore::new();
        let record = store
            .insert(NewDeck::new(false, cards(&["AC", "KH"])))
            .await
            .unwrap();

        let mut first = record.clone();
        first.cards.truncate(1);
        store
            .update(&first, UpdateOptions::expect_version(record.version))
            .await
            .unwrap();

        let mut second = record.clone();
        second.cards.clear();
        let result = store
            .update(&second, UpdateOptions::expect_version(record.version))
            .await;

        match result {
            Err(DeckStoreError::ConcurrencyConflict {
                expected, actual, ..
            }) => {
                assert_eq!(expected, Version::initial());
                assert_eq!(actual, Version::new(1));
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let stored = store.get(record.id).await.unwrap();
        assert_eq!(stored.cards, cards(&["AC"]));
    }

    #[tokio::test]
    async fn update_unknown_deck_is_not_found() {
        let store = InMemoryDeckStore::new();
        let record = DeckRecord::from_new(DeckId::new(), NewDeck::new(false, vec![]));
        let result = store.update(&record, UpdateOptions::new()).await;
        assert!(matches!(result, Err(DeckStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn clear_removes_all_decks() {
        let store = InMemoryDeckStore::new();
        store.insert(NewDeck::new(false, vec![])).await.unwrap();
        store.clear().await;
        assert_eq!(store.deck_count().await, 0);
        assert!(!store.exists(DeckId::new()).await.unwrap());
    }
}
