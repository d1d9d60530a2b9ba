//! Card codec.
//!
//! A card is identified by its code, `<rank><suit>`: `"AS"`, `"10D"`, `"QH"`.
//! Only the 52 standard codes decode; everything else is a [`CardError`].
//! On the wire a card is always the object `{value, suit, code}`.

use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Errors produced when decoding a card code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The code is empty, or its rank or suit is not recognised.
    #[error("invalid card code: {0:?}")]
    InvalidCardCode(String),
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    /// Returns the one-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::Hearts => "H",
        }
    }

    /// Returns the display name, e.g. `"SPADES"`.
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Diamonds => "DIAMONDS",
            Suit::Clubs => "CLUBS",
            Suit::Hearts => "HEARTS",
        }
    }

    /// Looks up a suit by its one-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Suit::ALL.into_iter().find(|suit| suit.code() == code)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in canonical deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Returns the rank prefix used in card codes.
    pub fn code(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Returns the display value.
    ///
    /// Numeric ranks display as their digits; face ranks by name.
    pub fn value(&self) -> &'static str {
        match self {
            Rank::Ace => "ACE",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
            numeric => numeric.code(),
        }
    }

    /// Looks up a rank by its code prefix.
    pub fn from_code(code: &str) -> Option<Self> {
        Rank::ALL.into_iter().find(|rank| rank.code() == code)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A playing card from the standard 52-card set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Creates a card from its rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Decodes a card code such as `"AS"` or `"10D"`.
    pub fn decode(code: &str) -> Result<Self, CardError> {
        code.parse()
    }

    /// Returns true if `code` is one of the 52 canonical codes.
    pub fn is_valid_code(code: &str) -> bool {
        Self::decode(code).is_ok()
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the canonical code, e.g. `"10D"`.
    pub fn code(&self) -> String {
        format!("{}{}", self.rank.code(), self.suit.code())
    }

    /// Returns the display value, e.g. `"ACE"` or `"7"`.
    pub fn value(&self) -> &'static str {
        self.rank.value()
    }

    /// Returns the display suit, e.g. `"SPADES"`.
    pub fn suit_name(&self) -> &'static str {
        self.suit.name()
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidCardCode(code.to_string());

        // The suit is always the last character; char boundaries matter for
        // arbitrary client input.
        let (split, _) = code.char_indices().next_back().ok_or_else(invalid)?;
        let (rank, suit) = code.split_at(split);

        let suit = Suit::from_code(suit).ok_or_else(invalid)?;
        let rank = Rank::from_code(rank).ok_or_else(invalid)?;
        Ok(Self { rank, suit })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.code())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut card = serializer.serialize_struct("Card", 3)?;
        card.serialize_field("value", self.value())?;
        card.serialize_field("suit", self.suit_name())?;
        card.serialize_field("code", &self.code())?;
        card.end()
    }
}
