use async_trait::async_trait;
use common::Card;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    DeckId, DeckRecord, DeckStoreError, NewDeck, Result, Version,
    store::{DeckStore, UpdateOptions, validate_cards_for_write},
};

/// PostgreSQL-backed deck store.
///
/// Decks live in a single `decks` table; cards are stored as their text codes
/// and decoded on read.
#[derive(Clone)]
pub struct PostgresDeckStore {
    pool: PgPool,
}

impl PostgresDeckStore {
    /// Creates a new PostgreSQL deck store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_deck(row: PgRow) -> Result<DeckRecord> {
        let id = DeckId::from_uuid(row.try_get::<Uuid, _>("id")?);
        let codes: Vec<String> = row.try_get("cards")?;
        let cards = codes
            .iter()
            .map(|code| Card::decode(code))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|source| DeckStoreError::CorruptCard { deck_id: id, source })?;

        Ok(DeckRecord {
            id,
            shuffled: row.try_get("shuffled")?,
            cards,
            created_at: row.try_get("created_at")?,
            version: Version::new(row.try_get::<i32, _>("version")?.into()),
        })
    }
}

#[async_trait]
impl DeckStore for PostgresDeckStore {
    async fn insert(&self, deck: NewDeck) -> Result<DeckRecord> {
        validate_cards_for_write(&deck.cards)?;

        let record = DeckRecord::from_new(DeckId::new(), deck);

        let row = sqlx::query(
            r#"
            INSERT INTO decks (id, shuffled, cards, created_at, version)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, shuffled, cards, created_at, version
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.shuffled)
        .bind(record.card_codes())
        .bind(record.created_at)
        .bind(record.version.as_i64() as i32)
        .fetch_one(&self.pool)
        .await?;

        // Read back what the database holds; created_at loses sub-microsecond precision.
        Self::row_to_deck(row)
    }

    async fn get(&self, id: DeckId) -> Result<DeckRecord> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, shuffled, cards, created_at, version
            FROM decks
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_deck(row),
            None => Err(DeckStoreError::NotFound(id.to_string())),
        }
    }

    async fn update(&self, deck: &DeckRecord, options: UpdateOptions) -> Result<Version> {
        validate_cards_for_write(&deck.cards)?;

        let new_version: Option<i32> = match options.expected_version {
            Some(expected) => {
                sqlx::query_scalar(
                    r#"
                    UPDATE decks
                    SET cards = $1, version = version + 1
                    WHERE id = $2 AND version = $3
                    RETURNING version
                    "#,
                )
                .bind(deck.card_codes())
                .bind(deck.id.as_uuid())
                .bind(expected.as_i64() as i32)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    r#"
                    UPDATE decks
                    SET cards = $1, version = version + 1
                    WHERE id = $2
                    RETURNING version
                    "#,
                )
                .bind(deck.card_codes())
                .bind(deck.id.as_uuid())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        if let Some(version) = new_version {
            return Ok(Version::new(version.into()));
        }

        // No row changed: either the deck is gone or the version moved on.
        let actual: Option<i32> = sqlx::query_scalar("SELECT version FROM decks WHERE id = $1")
            .bind(deck.id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match (actual, options.expected_version) {
            (Some(actual), Some(expected)) => {
                tracing::debug!(deck_id = %deck.id, %expected, actual, "stale deck update");
                Err(DeckStoreError::ConcurrencyConflict {
                    deck_id: deck.id,
                    expected,
                    actual: Version::new(actual.into()),
                })
            }
            _ => Err(DeckStoreError::NotFound(deck.id.to_string())),
        }
    }
}
