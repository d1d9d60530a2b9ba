//! JSON request body extractor.
//!
//! Accepts any content type. Failures become `400 Bad Request` with a message
//! that names what was wrong with the body.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// Body size limit in effect, published as a request extension so rejections
/// can report it.
#[derive(Debug, Clone, Copy)]
pub struct MaxBodyBytes(pub usize);

/// Deserializes the request body as JSON into `T`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let limit = req.extensions().get::<MaxBodyBytes>().copied();

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            match (rejection.status(), limit) {
                (StatusCode::PAYLOAD_TOO_LARGE, Some(MaxBodyBytes(max))) => {
                    ApiError::BadRequest(format!("body must not be larger than {max} bytes"))
                }
                _ => ApiError::BadRequest(rejection.body_text()),
            }
        })?;

        decode_body(&bytes).map(JsonBody).map_err(ApiError::BadRequest)
    }
}

/// Decodes a JSON body, describing failures in client terms.
pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err("body must not be empty".to_string());
    }
    serde_json::from_slice(bytes).map_err(describe)
}

fn describe(err: serde_json::Error) -> String {
    let text = err.to_string();
    match err.classify() {
        Category::Syntax if text.starts_with("trailing characters") => {
            "body must only contain a single JSON value".to_string()
        }
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {}, column {})",
            err.line(),
            err.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data => match quoted_name(&text, "unknown field `") {
            Some(key) => format!("body contains unknown key \"{key}\""),
            None => match quoted_name(&text, "missing field `") {
                Some(key) => format!("body is missing key \"{key}\""),
                None => format!(
                    "body contains incorrect JSON type (at line {}, column {})",
                    err.line(),
                    err.column()
                ),
            },
        },
        Category::Io => text,
    }
}

/// Pulls the backquoted name out of a serde message such as
/// ``unknown field `foo`, expected ...``.
fn quoted_name<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    rest.split('`').next()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Draw {
        count: i64,
    }

    #[test]
    fn decodes_valid_body() {
        let draw: Draw = decode_body(br#"{"count": 3}"#).unwrap();
        assert_eq!(draw.count, 3);
    }

    #[test]
    fn empty_body() {
        let err = decode_body::<Draw>(b"  \n").unwrap_err();
        assert_eq!(err, "body must not be empty");
    }

    #[test]
    fn malformed_json() {
        let err = decode_body::<Draw>(br#"{"count": }"#).unwrap_err();
        assert!(err.starts_with("body contains badly-formed JSON"), "{err}");
    }

    #[test]
    fn truncated_json() {
        let err = decode_body::<Draw>(br#"{"count": 3"#).unwrap_err();
        assert_eq!(err, "body contains badly-formed JSON");
    }

    #[test]
    fn unknown_key() {
        let err = decode_body::<Draw>(br#"{"count": 3, "foo": 1}"#).unwrap_err();
        assert_eq!(err, "body contains unknown key \"foo\"");
    }

    #[test]
    fn missing_key() {
        let err = decode_body::<Draw>(b"{}").unwrap_err();
        assert_eq!(err, "body is missing key \"count\"");
    }

    #[test]
    fn wrong_type() {
        let err = decode_body::<Draw>(br#"{"count": "three"}"#).unwrap_err();
        assert!(err.starts_with("body contains incorrect JSON type"), "{err}");
    }

    #[test]
    fn multiple_values() {
        let err = decode_body::<Draw>(br#"{"count": 1}{"count": 2}"#).unwrap_err();
        assert_eq!(err, "body must only contain a single JSON value");
    }
}
