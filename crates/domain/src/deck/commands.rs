//! Deck commands.

/// Command to create a new deck.
#[derive(Debug, Clone, Default)]
pub struct CreateDeck {
    /// Randomize the initial order.
    pub shuffled: bool,

    /// Explicit card codes. `None` means the full canonical deck; an explicit
    /// list is validated first.
    pub cards: Option<Vec<String>>,
}

impl CreateDeck {
    /// Creates a full 52-card deck.
    pub fn full(shuffled: bool) -> Self {
        Self {
            shuffled,
            cards: None,
        }
    }

    /// Creates a deck from an explicit list of card codes.
    pub fn with_cards<I, S>(shuffled: bool, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shuffled,
            cards: Some(codes.into_iter().map(Into::into).collect()),
        }
    }
}

/// Command to draw cards from the front of a deck.
#[derive(Debug, Clone)]
pub struct DrawCards {
    /// Client supplied deck identifier.
    pub deck_id: String,

    /// How many cards to draw.
    pub count: i64,
}

impl DrawCards {
    pub fn new(deck_id: impl Into<String>, count: i64) -> Self {
        Self {
            deck_id: deck_id.into(),
            count,
        }
    }
}
