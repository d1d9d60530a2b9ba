use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a deck.
///
/// Wraps a UUID so deck ids cannot be mixed up with other identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Uuid);

impl DeckId {
    /// Creates a new random deck ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deck ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a client supplied identifier.
    ///
    /// Returns `None` for anything that is not UUID-shaped; such a string can
    /// never name a stored deck.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeckId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for DeckId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<DeckId> for Uuid {
    fn from(id: DeckId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_id_new_creates_unique_ids() {
        let id1 = DeckId::new();
        let id2 = DeckId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn deck_id_display_is_36_chars() {
        assert_eq!(DeckId::new().to_string().len(), 36);
    }

    #[test]
    fn deck_id_parse_roundtrips_display() {
        let id = DeckId::new();
        assert_eq!(DeckId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn deck_id_parse_rejects_non_uuid() {
        assert_eq!(DeckId::parse("wrongid"), None);
        assert_eq!(DeckId::parse(""), None);
        assert_eq!(DeckId::parse("5"), None);
    }

    #[test]
    fn deck_id_serializes_as_plain_string() {
        let id = DeckId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
