//! Deck aggregate and related types.

mod aggregate;
mod commands;
mod factory;
mod service;
mod validation;

pub use aggregate::{Deck, DrawError, DrawViolation};
pub use commands::{CreateDeck, DrawCards};
pub use factory::{DeckFactory, canonical_deck, shuffle};
pub use service::{DeckService, DrawResult};
pub use validation::{ValidationErrors, validate_cards, validate_draw_count};

use thiserror::Error;

/// Errors that can occur during deck operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The requested card list breaks one or more rules.
    #[error("Invalid card list: {0}")]
    InvalidCards(ValidationErrors),

    /// The draw was rejected before touching the deck.
    #[error("Invalid draw: {0}")]
    InvalidDraw(DrawError),
}

impl DeckError {
    /// Returns the field → messages map describing the violation.
    pub fn validation_errors(&self) -> ValidationErrors {
        match self {
            DeckError::InvalidCards(errors) => errors.clone(),
            DeckError::InvalidDraw(err) => err.to_validation_errors(),
        }
    }
}
