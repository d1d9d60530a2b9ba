//! Deck factory: canonical order and shuffling.

use std::sync::{Mutex, PoisonError};

use common::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Returns the 52 cards in canonical order.
///
/// Suits run S, D, C, H; within a suit ranks run A, 2..10, J, Q, K. The
/// first card is always `AS`.
pub fn canonical_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(Suit::ALL.len() * Rank::ALL.len());
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Uniformly permutes `cards` in place (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// Builds the initial card sequence for new decks.
///
/// Owns the random source used for shuffling. The source is injected so tests
/// can seed it; the default draws its seed from the OS.
pub struct DeckFactory {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl DeckFactory {
    /// Creates a factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates a factory with a fixed seed; shuffles are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a factory around any random source.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Produces the starting cards for a deck.
    ///
    /// `None` or an empty list yields the canonical 52; the result is shuffled
    /// when requested.
    pub fn build(&self, cards: Option<Vec<Card>>, shuffled: bool) -> Vec<Card> {
        let mut cards = match cards {
            Some(cards) if !cards.is_empty() => cards,
            _ => canonical_deck(),
        };
        if shuffled {
            self.shuffle(&mut cards);
        }
        cards
    }

    /// Shuffles `cards` with this factory's random source.
    pub fn shuffle(&self, cards: &mut [Card]) {
        // A poisoned generator is still a valid generator.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle(cards, &mut *rng);
    }
}

impl Default for DeckFactory {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for DeckFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckFactory").finish_non_exhaustive()
    }
}
