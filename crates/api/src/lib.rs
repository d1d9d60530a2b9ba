//! HTTP API server for the deck service.
//!
//! Provides versioned REST endpoints to create, inspect and draw from decks,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Router};
use deck_store::DeckStore;
use domain::DeckService;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use extract::MaxBodyBytes;
use routes::decks::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// Request bodies larger than `max_body_bytes` are rejected with `400`.
pub fn create_app<S: DeckStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    max_body_bytes: usize,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/v1/healthcheck", get(routes::health::check))
        .route("/v1/decks", post(routes::decks::create::<S>))
        .route(
            "/v1/decks/{id}",
            get(routes::decks::show::<S>).put(routes::decks::draw::<S>),
        )
        .method_not_allowed_fallback(routes::decks::method_not_allowed)
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::decks::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(MaxBodyBytes(max_body_bytes)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a deck store.
pub fn create_default_state<S: DeckStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        deck_service: DeckService::new(store),
    })
}
