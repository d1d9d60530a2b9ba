//! Deck service: create, show and draw against a deck store.

use common::Card;
use deck_store::{DeckStore, DeckStoreError, DeckStoreExt, NewDeck, UpdateOptions};

use crate::error::DomainError;

use super::validation::CARDS_FIELD;
use super::{
    CreateDeck, Deck, DeckError, DeckFactory, DrawCards, DrawError, ValidationErrors,
    validate_cards,
};

/// Outcome of a successful draw.
#[derive(Debug, Clone)]
pub struct DrawResult {
    /// The drawn cards, in the order they sat in the deck.
    pub drawn: Vec<Card>,

    /// The deck after the draw, as persisted.
    pub deck: Deck,
}

/// Service for managing decks.
///
/// Every mutation is read → change in memory → write back. Draws write with
/// the version they read, so two concurrent draws on one deck cannot both
/// succeed; the loser gets `ConcurrencyConflict` and must retry.
pub struct DeckService<S: DeckStore> {
    store: S,
    factory: DeckFactory,
}

impl<S: DeckStore> DeckService<S> {
    /// Creates a new deck service with an entropy-seeded factory.
    pub fn new(store: S) -> Self {
        Self::with_factory(store, DeckFactory::from_entropy())
    }

    /// Creates a deck service with a specific factory.
    pub fn with_factory(store: S, factory: DeckFactory) -> Self {
        Self { store, factory }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and persists a new deck.
    ///
    /// An explicit card list is validated; nothing is stored when any rule
    /// fails. Missing or empty lists become the canonical 52 cards.
    #[tracing::instrument(skip(self, cmd), fields(shuffled = cmd.shuffled))]
    pub async fn create_deck(&self, cmd: CreateDeck) -> Result<Deck, DomainError> {
        let cards = cmd.cards.map(|codes| parse_cards(&codes)).transpose()?;

        let cards = self.factory.build(cards, cmd.shuffled);
        let record = self.store.insert(NewDeck::new(cmd.shuffled, cards)).await?;
        let deck = Deck::from(record);

        metrics::counter!("decks_created_total").increment(1);
        tracing::info!(deck_id = %deck.id(), remaining = deck.remaining(), "deck created");

        Ok(deck)
    }

    /// Loads a deck by a client supplied identifier.
    ///
    /// Unknown and malformed identifiers both fail with a not-found store error.
    #[tracing::instrument(skip(self))]
    pub async fn get_deck(&self, deck_id: &str) -> Result<Deck, DomainError> {
        let record = self.store.get_by_key(deck_id).await?;
        Ok(Deck::from(record))
    }

    /// Draws `count` cards from the front of a deck and persists the rest.
    ///
    /// The count is checked before the lookup, so an out-of-range count is
    /// rejected even for unknown decks.
    #[tracing::instrument(skip(self))]
    pub async fn draw_cards(&self, cmd: DrawCards) -> Result<DrawResult, DomainError> {
        if let Some(violation) = Deck::check_count(cmd.count) {
            return Err(self.reject_draw(DrawError::new(vec![violation])));
        }

        let mut deck = self.get_deck(&cmd.deck_id).await?;
        let drawn = deck.draw(cmd.count).map_err(|e| self.reject_draw(e))?;

        let options = UpdateOptions::expect_version(deck.version());
        let version = self
            .store
            .update(&deck.to_record(), options)
            .await
            .inspect_err(|e| {
                if let DeckStoreError::ConcurrencyConflict { .. } = e {
                    metrics::counter!("deck_update_conflicts_total").increment(1);
                    tracing::warn!(deck_id = %deck.id(), "concurrent draw lost the race");
                }
            })?;
        deck.set_version(version);

        metrics::counter!("cards_drawn_total").increment(drawn.len() as u64);
        tracing::info!(
            deck_id = %deck.id(),
            drawn = drawn.len(),
            remaining = deck.remaining(),
            "cards drawn"
        );

        Ok(DrawResult { drawn, deck })
    }

    fn reject_draw(&self, err: DrawError) -> DomainError {
        metrics::counter!("deck_draws_rejected_total").increment(1);
        tracing::debug!(reason = %err, "draw rejected");
        DomainError::Deck(DeckError::InvalidDraw(err))
    }
}

/// Validates and decodes a client supplied card list.
fn parse_cards(codes: &[String]) -> Result<Vec<Card>, DeckError> {
    validate_cards(codes)
        .into_result()
        .map_err(DeckError::InvalidCards)?;

    codes
        .iter()
        .map(|code| Card::decode(code))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add(CARDS_FIELD, e.to_string());
            DeckError::InvalidCards(errors)
        })
}
