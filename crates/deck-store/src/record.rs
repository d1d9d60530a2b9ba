use chrono::{DateTime, Utc};
use common::{Card, DeckId};
use serde::{Deserialize, Serialize};

/// Version number for a stored deck, used for optimistic concurrency control.
///
/// A freshly inserted deck is at version 0; every successful update
/// increments it by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the version of a newly inserted deck (0).
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// A deck that has not been persisted yet.
///
/// The store assigns the id, creation time and initial version on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeck {
    pub shuffled: bool,
    pub cards: Vec<Card>,
}

impl NewDeck {
    pub fn new(shuffled: bool, cards: Vec<Card>) -> Self {
        Self { shuffled, cards }
    }
}

/// A deck row as held by a [`DeckStore`](crate::DeckStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRecord {
    /// Identifier assigned on insert.
    pub id: DeckId,

    /// Whether the initial card order was randomized.
    pub shuffled: bool,

    /// Remaining cards, front first.
    pub cards: Vec<Card>,

    /// When the deck was inserted.
    pub created_at: DateTime<Utc>,

    /// Incremented by the store on every successful update.
    pub version: Version,
}

impl DeckRecord {
    /// Builds the record for a freshly inserted deck.
    pub fn from_new(id: DeckId, deck: NewDeck) -> Self {
        Self {
            id,
            shuffled: deck.shuffled,
            cards: deck.cards,
            created_at: Utc::now(),
            version: Version::initial(),
        }
    }

    /// Card codes in draw order, as persisted.
    pub fn card_codes(&self) -> Vec<String> {
        self.cards.iter().map(Card::code).collect()
    }
}
