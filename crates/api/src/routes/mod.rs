pub mod decks;
pub mod health;
pub mod metrics;
