//! Integration tests for the deck lifecycle.
//!
//! These tests drive DeckService end to end against the in-memory and mock
//! stores: creation, lookup, draws and version handling.

use std::collections::HashSet;

use common::Card;
use deck_store::{
    DeckStore, DeckStoreError, InMemoryDeckStore, MOCK_CARDS, MOCK_DECK_ID, MockDeckStore,
    UpdateOptions, Version,
};
use domain::{CreateDeck, DeckError, DeckFactory, DeckService, DomainError, DrawCards};

fn create_service() -> DeckService<InMemoryDeckStore> {
    DeckService::new(InMemoryDeckStore::new())
}

fn codes(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::code).collect()
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn remaining_matches_requested_cards() {
        let service = create_service();

        let cases: Vec<(CreateDeck, usize)> = vec![
            (CreateDeck::full(false), 52),
            (CreateDeck::full(true), 52),
            (CreateDeck::with_cards(false, Vec::<String>::new()), 52),
            (CreateDeck::with_cards(false, ["AS"]), 1),
            (CreateDeck::with_cards(false, ["AS", "4D"]), 2),
            (CreateDeck::with_cards(true, ["AC", "KH", "6D"]), 3),
        ];

        for (cmd, expected) in cases {
            let deck = service.create_deck(cmd).await.unwrap();
            assert_eq!(deck.remaining(), expected);
        }
        assert_eq!(service.store().deck_count().await, 6);
    }

    #[tokio::test]
    async fn rejected_lists_leave_store_untouched() {
        let service = create_service();

        for cards in [vec!["AS", "AS"], vec!["RR"], vec!["8D", "ZZ"]] {
            let err = service
                .create_deck(CreateDeck::with_cards(false, cards))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Deck(DeckError::InvalidCards(_))));
        }

        assert_eq!(service.store().deck_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_list_is_rejected() {
        let service = create_service();
        let mut cards: Vec<String> = domain::canonical_deck().iter().map(Card::code).collect();
        cards.push("AS".to_string());

        let err = service
            .create_deck(CreateDeck::with_cards(false, cards))
            .await
            .unwrap_err();

        let DomainError::Deck(err) = err else {
            panic!("expected a deck error");
        };
        assert!(
            err.validation_errors()
                .messages("cards")
                .contains(&"must not contain more than 52 cards".to_string())
        );
    }

    #[tokio::test]
    async fn unshuffled_decks_keep_their_front_card() {
        let service = create_service();
        let input = ["KC", "3H", "QS", "AD", "7H", "2C", "9S", "JD"];

        for _ in 0..30 {
            let deck = service
                .create_deck(CreateDeck::with_cards(false, input))
                .await
                .unwrap();
            assert_eq!(deck.cards()[0].code(), "KC");
        }
    }

    #[tokio::test]
    async fn shuffled_decks_vary_their_front_card() {
        let service = create_service();
        let input = ["KC", "3H", "QS", "AD", "7H", "2C", "9S", "JD"];

        let mut fronts = HashSet::new();
        for _ in 0..30 {
            let deck = service
                .create_deck(CreateDeck::with_cards(true, input))
                .await
                .unwrap();
            fronts.insert(deck.cards()[0].code());
        }

        assert!(fronts.len() > 1);
    }

    #[tokio::test]
    async fn seeded_factory_makes_shuffles_reproducible() {
        let a = DeckService::with_factory(InMemoryDeckStore::new(), DeckFactory::seeded(99));
        let b = DeckService::with_factory(InMemoryDeckStore::new(), DeckFactory::seeded(99));

        let deck_a = a.create_deck(CreateDeck::full(true)).await.unwrap();
        let deck_b = b.create_deck(CreateDeck::full(true)).await.unwrap();

        assert_eq!(deck_a.cards(), deck_b.cards());
    }
}

mod drawing {
    use super::*;

    #[tokio::test]
    async fn draw_until_exhausted() {
        let service = create_service();
        let deck = service
            .create_deck(CreateDeck::with_cards(false, ["AC", "KH", "QD", "3H", "5S"]))
            .await
            .unwrap();
        let id = deck.id().to_string();

        let first = service.draw_cards(DrawCards::new(&id, 2)).await.unwrap();
        assert_eq!(codes(&first.drawn), ["AC", "KH"]);
        assert_eq!(first.deck.version(), Version::new(1));

        let second = service.draw_cards(DrawCards::new(&id, 3)).await.unwrap();
        assert_eq!(codes(&second.drawn), ["QD", "3H", "5S"]);
        assert_eq!(second.deck.remaining(), 0);
        assert_eq!(second.deck.version(), Version::new(2));

        let err = service
            .draw_cards(DrawCards::new(&id, 1))
            .await
            .unwrap_err();
        let DomainError::Deck(DeckError::InvalidDraw(err)) = err else {
            panic!("expected a draw error");
        };
        assert_eq!(
            err.to_validation_errors().messages("deck"),
            ["has already been dealt"]
        );
    }

    #[tokio::test]
    async fn overdraw_leaves_deck_unchanged() {
        let service = create_service();
        let deck = service
            .create_deck(CreateDeck::with_cards(false, ["AC", "KH"]))
            .await
            .unwrap();
        let id = deck.id().to_string();

        let err = service.draw_cards(DrawCards::new(&id, 3)).await.unwrap_err();
        assert!(matches!(err, DomainError::Deck(DeckError::InvalidDraw(_))));

        let stored = service.get_deck(&id).await.unwrap();
        assert_eq!(codes(stored.cards()), ["AC", "KH"]);
        assert_eq!(stored.version(), Version::initial());
    }

    #[tokio::test]
    async fn out_of_range_counts_are_rejected() {
        let service = create_service();
        let deck = service.create_deck(CreateDeck::full(false)).await.unwrap();
        let id = deck.id().to_string();

        for count in [0, -1, 53] {
            let err = service
                .draw_cards(DrawCards::new(&id, count))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Deck(DeckError::InvalidDraw(_))));
        }

        assert_eq!(service.get_deck(&id).await.unwrap().remaining(), 52);
    }

    #[tokio::test]
    async fn stale_write_is_a_conflict() {
        let service = create_service();
        let deck = service
            .create_deck(CreateDeck::with_cards(false, ["AC", "KH", "QD"]))
            .await
            .unwrap();
        let id = deck.id().to_string();

        // Another writer moves the deck on after our read.
        let stale = service.get_deck(&id).await.unwrap();
        service.draw_cards(DrawCards::new(&id, 1)).await.unwrap();

        let result = service
            .store()
            .update(&stale.to_record(), UpdateOptions::expect_version(stale.version()))
            .await;
        assert!(matches!(
            result,
            Err(DeckStoreError::ConcurrencyConflict { .. })
        ));
    }
}

mod lookup {
    use super::*;

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let service = create_service();

        for id in [
            "wrongid".to_string(),
            String::new(),
            "5".to_string(),
            common::DeckId::new().to_string(),
        ] {
            let err = service.get_deck(&id).await.unwrap_err();
            assert!(err.is_not_found(), "{id:?} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn mock_store_resolves_only_its_id() {
        let service = DeckService::new(MockDeckStore::new());

        let deck = service.get_deck(MOCK_DECK_ID).await.unwrap();
        assert_eq!(deck.id().to_string(), MOCK_DECK_ID);
        assert_eq!(codes(deck.cards()), MOCK_CARDS);
        assert!(!deck.shuffled());

        let err = service.get_deck("wrongid").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn mock_store_creation_echoes_mock_id() {
        let service = DeckService::new(MockDeckStore::new());

        let deck = service
            .create_deck(CreateDeck::with_cards(false, ["KC", "3H", "QS"]))
            .await
            .unwrap();

        assert_eq!(deck.id().to_string(), MOCK_DECK_ID);
        assert_eq!(deck.remaining(), 3);
    }
}
