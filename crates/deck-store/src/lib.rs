pub mod error;
pub mod memory;
pub mod mock;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::DeckId;
pub use error::{DeckStoreError, Result};
pub use memory::InMemoryDeckStore;
pub use mock::{MOCK_CARDS, MOCK_DECK_ID, MockDeckStore};
pub use postgres::PostgresDeckStore;
pub use record::{DeckRecord, NewDeck, Version};
pub use store::{DeckStore, DeckStoreExt, MAX_DECK_SIZE, UpdateOptions, validate_cards_for_write};
