//! Domain layer for the deck service.
//!
//! This crate provides:
//! - the deck factory (canonical order and shuffling)
//! - card list and draw count validation
//! - the Deck aggregate and its draw operation
//! - DeckService, which runs create / show / draw against a DeckStore

pub mod deck;
pub mod error;

pub use deck::{
    CreateDeck, Deck, DeckError, DeckFactory, DeckService, DrawCards, DrawError, DrawResult,
    DrawViolation, ValidationErrors, canonical_deck, shuffle, validate_cards, validate_draw_count,
};
pub use error::DomainError;
