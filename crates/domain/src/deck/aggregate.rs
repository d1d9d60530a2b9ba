//! Deck aggregate implementation.

use chrono::{DateTime, Utc};
use common::{Card, DeckId};
use deck_store::{DeckRecord, MAX_DECK_SIZE, Version};
use thiserror::Error;

use super::validation::{
    COUNT_FIELD, COUNT_NOT_POSITIVE, COUNT_TOO_LARGE, DECK_FIELD, ValidationErrors,
};

/// A single reason a draw was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawViolation {
    /// Count is outside `1..=52`.
    #[error("invalid draw count {count}")]
    InvalidDrawCount { count: i64 },

    /// The deck holds fewer cards than requested.
    #[error("requested {requested} cards but only {remaining} remain")]
    InsufficientCards { requested: i64, remaining: usize },

    /// The deck has no cards left.
    #[error("deck has no cards left")]
    DeckExhausted,
}

impl DrawViolation {
    /// The request field this violation is reported under.
    pub fn field(&self) -> &'static str {
        match self {
            DrawViolation::InvalidDrawCount { .. } => COUNT_FIELD,
            DrawViolation::InsufficientCards { .. } | DrawViolation::DeckExhausted => DECK_FIELD,
        }
    }

    /// The client facing message.
    pub fn message(&self) -> &'static str {
        match self {
            DrawViolation::InvalidDrawCount { count } if *count <= 0 => COUNT_NOT_POSITIVE,
            DrawViolation::InvalidDrawCount { .. } => COUNT_TOO_LARGE,
            DrawViolation::InsufficientCards { .. } => "has less cards than requested",
            DrawViolation::DeckExhausted => "has already been dealt",
        }
    }
}

/// A refused draw, carrying every violated precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawError {
    violations: Vec<DrawViolation>,
}

impl DrawError {
    pub fn new(violations: Vec<DrawViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[DrawViolation] {
        &self.violations
    }

    pub fn contains(&self, violation: &DrawViolation) -> bool {
        self.violations.contains(violation)
    }

    /// Field → messages form for API responses.
    pub fn to_validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for violation in &self.violations {
            errors.add(violation.field(), violation.message());
        }
        errors
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reasons: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", reasons.join("; "))
    }
}

impl std::error::Error for DrawError {}

/// Deck aggregate root.
///
/// Holds the remaining cards of a persisted deck in draw order; the front of
/// `cards` is the next card drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    id: DeckId,
    shuffled: bool,
    cards: Vec<Card>,
    created_at: DateTime<Utc>,
    version: Version,
}

// Query methods
impl Deck {
    pub fn id(&self) -> DeckId {
        self.id
    }

    /// Whether the initial card order was randomized.
    pub fn shuffled(&self) -> bool {
        self.shuffled
    }

    /// Remaining cards, front first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards left. Always `cards().len()`.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Version last read from or written to the store.
    pub fn version(&self) -> Version {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Record form for writing back to the store.
    pub fn to_record(&self) -> DeckRecord {
        DeckRecord {
            id: self.id,
            shuffled: self.shuffled,
            cards: self.cards.clone(),
            created_at: self.created_at,
            version: self.version,
        }
    }
}

// Draw
impl Deck {
    /// Checks a draw count without looking at any deck.
    pub fn check_count(count: i64) -> Option<DrawViolation> {
        if count <= 0 || count > MAX_DECK_SIZE as i64 {
            Some(DrawViolation::InvalidDrawCount { count })
        } else {
            None
        }
    }

    /// Returns every precondition a draw of `count` would violate.
    ///
    /// An exhausted deck reports `DeckExhausted` alone for the deck field,
    /// whatever the count.
    pub fn check_draw(&self, count: i64) -> Vec<DrawViolation> {
        let mut violations: Vec<DrawViolation> = Self::check_count(count).into_iter().collect();

        let remaining = self.remaining();
        if remaining == 0 {
            violations.push(DrawViolation::DeckExhausted);
        } else if count > remaining as i64 {
            violations.push(DrawViolation::InsufficientCards {
                requested: count,
                remaining,
            });
        }

        violations
    }

    /// Removes the first `count` cards and returns them in their existing order.
    ///
    /// On error the deck is untouched. The new state is in memory only until
    /// it is written back through the store.
    pub fn draw(&mut self, count: i64) -> Result<Vec<Card>, DrawError> {
        let violations = self.check_draw(count);
        if !violations.is_empty() {
            return Err(DrawError::new(violations));
        }

        // check_draw guarantees 0 < count <= remaining
        let count = count as usize;
        let rest = self.cards.split_off(count);
        Ok(std::mem::replace(&mut self.cards, rest))
    }
}

impl From<DeckRecord> for Deck {
    fn from(record: DeckRecord) -> Self {
        Self {
            id: record.id,
            shuffled: record.shuffled,
            cards: record.cards,
            created_at: record.created_at,
            version: record.version,
        }
    }
}
