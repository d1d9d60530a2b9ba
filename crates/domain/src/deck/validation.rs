//! Card list and draw count validation.
//!
//! Every rule runs; violations are collected per field rather than stopping
//! at the first one.

use std::collections::{BTreeMap, HashSet};

use common::Card;
use deck_store::MAX_DECK_SIZE;
use serde::Serialize;

pub const CARDS_FIELD: &str = "cards";
pub const COUNT_FIELD: &str = "count";
pub const DECK_FIELD: &str = "deck";

pub const DUPLICATED_CARDS: &str = "must not contain duplicated values";
pub const TOO_MANY_CARDS: &str = "must not contain more than 52 cards";
pub const INVALID_CARD: &str = "contains invalid card";
pub const COUNT_NOT_POSITIVE: &str = "must be more than zero";
pub const COUNT_TOO_LARGE: &str = "must be equal or less than 52";

/// Field → messages map of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Records a message against a field. Repeated messages are kept once.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Returns the messages recorded for a field.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Folds another set of errors into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            for message in messages {
                self.add(&field, message);
            }
        }
    }

    /// Returns `Ok(())` when valid, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field} {}", messages.join(", "))?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a client supplied card list.
///
/// Checks uniqueness, the 52-card ceiling and membership in the canonical set.
pub fn validate_cards<S: AsRef<str>>(codes: &[S]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let mut seen = HashSet::with_capacity(codes.len());
    let unique = codes.iter().all(|code| seen.insert(code.as_ref()));
    errors.check(unique, CARDS_FIELD, DUPLICATED_CARDS);

    errors.check(codes.len() <= MAX_DECK_SIZE, CARDS_FIELD, TOO_MANY_CARDS);

    let all_known = codes.iter().all(|code| Card::is_valid_code(code.as_ref()));
    errors.check(all_known, CARDS_FIELD, INVALID_CARD);

    errors
}

/// Validates a requested draw count on its own, without looking at a deck.
pub fn validate_draw_count(count: i64) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check(count > 0, COUNT_FIELD, COUNT_NOT_POSITIVE);
    errors.check(count <= MAX_DECK_SIZE as i64, COUNT_FIELD, COUNT_TOO_LARGE);
    errors
}
