//! API error types with HTTP response mapping.
//!
//! Every error body has the shape `{"error": ...}`; the payload is a message
//! string, or a field → messages map for validation failures.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use deck_store::DeckStoreError;
use domain::{DomainError, ValidationErrors};
use serde_json::{Value, json};

const NOT_FOUND: &str = "the requested resource could not be found";
const EDIT_CONFLICT: &str = "unable to update the record due to an edit conflict, please try again";
const SERVER_ERROR: &str = "the server encountered a problem and could not process your request";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found, including malformed deck ids.
    NotFound,
    /// The route exists but not for this method.
    MethodNotAllowed(Method),
    /// Unreadable request body.
    BadRequest(String),
    /// The request was well formed but broke a deck rule.
    FailedValidation(ValidationErrors),
    /// A concurrent write won the race.
    EditConflict,
    /// Internal server error. The detail is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::EditConflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message: Value = match self {
            ApiError::NotFound => NOT_FOUND.into(),
            ApiError::MethodNotAllowed(method) => {
                format!("the {method} method is not supported for this resource").into()
            }
            ApiError::BadRequest(msg) => msg.into(),
            ApiError::FailedValidation(errors) => json!(errors),
            ApiError::EditConflict => EDIT_CONFLICT.into(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                SERVER_ERROR.into()
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Deck(deck_err) => ApiError::FailedValidation(deck_err.validation_errors()),
            DomainError::Store(DeckStoreError::NotFound(_)) => ApiError::NotFound,
            DomainError::Store(DeckStoreError::ConcurrencyConflict { .. }) => ApiError::EditConflict,
            other => ApiError::Internal(other.to_string()),
        }
    }
}
