//! Deck creation, inspection and draw endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{HeaderName, LOCATION};
use common::Card;
use deck_store::DeckStore;
use domain::{CreateDeck, Deck, DeckService, DrawCards};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::JsonBody;

/// Shared application state accessible from all handlers.
pub struct AppState<S: DeckStore> {
    pub deck_service: DeckService<S>,
}

// -- Request types --

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDeckRequest {
    #[serde(default)]
    pub shuffled: bool,
    #[serde(default)]
    pub cards: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawCardsRequest {
    pub count: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct DeckCreatedResponse {
    pub deck_id: String,
    pub shuffled: bool,
    pub remaining: usize,
}

#[derive(Serialize)]
pub struct DeckResponse {
    pub deck_id: String,
    pub shuffled: bool,
    pub remaining: usize,
    pub cards: Vec<Card>,
}

#[derive(Serialize)]
pub struct DrawResponse {
    pub cards: Vec<Card>,
}

impl From<&Deck> for DeckResponse {
    fn from(deck: &Deck) -> Self {
        Self {
            deck_id: deck.id().to_string(),
            shuffled: deck.shuffled(),
            remaining: deck.remaining(),
            cards: deck.cards().to_vec(),
        }
    }
}

// -- Handlers --

/// POST /v1/decks: create a full or partial deck, optionally shuffled.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: DeckStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(req): JsonBody<CreateDeckRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<DeckCreatedResponse>), ApiError> {
    let cmd = CreateDeck {
        shuffled: req.shuffled,
        cards: req.cards,
    };
    let deck = state.deck_service.create_deck(cmd).await?;

    let deck_id = deck.id().to_string();
    let location = format!("/v1/decks/{deck_id}");
    let response = DeckCreatedResponse {
        deck_id,
        shuffled: deck.shuffled(),
        remaining: deck.remaining(),
    };

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(response)))
}

/// GET /v1/decks/{id}: show a deck with its remaining cards.
#[tracing::instrument(skip(state))]
pub async fn show<S: DeckStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeckResponse>, ApiError> {
    let deck = state.deck_service.get_deck(&id).await?;
    Ok(Json(DeckResponse::from(&deck)))
}

/// PUT /v1/decks/{id}: draw cards from the front of a deck.
#[tracing::instrument(skip(state, req))]
pub async fn draw<S: DeckStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DrawCardsRequest>,
) -> Result<Json<DrawResponse>, ApiError> {
    let result = state
        .deck_service
        .draw_cards(DrawCards::new(id, req.count))
        .await?;

    Ok(Json(DrawResponse {
        cards: result.drawn,
    }))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: axum::http::Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
