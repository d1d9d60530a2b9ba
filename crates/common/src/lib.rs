//! Shared types for the deck service.
//!
//! - [`DeckId`]: opaque deck identifier
//! - [`Card`], [`Rank`], [`Suit`]: the card codec

pub mod card;
pub mod types;

pub use card::{Card, CardError, Rank, Suit};
pub use types::DeckId;
