//! Request extractors that reject through [`Error`]
//!
//! Both extractors hand the handler *raw* input so that validation order stays
//! in the handler's control: for `PUT` the body is validated before the id is
//! parsed.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::{Map, Value};

use crate::error::Error;

/// Raw JSON request body
///
/// An empty body reads as `{}`. The content type is not inspected; anything
/// that is not valid JSON is rejected with a validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::validation(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            Error::validation("Malformed JSON body")
        })
    }
}

/// Raw `{id}` path segment, parsed by the handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSegment(pub String);

impl<S> FromRequestParts<S> for IdSegment
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::validation(rejection.body_text()))?;

        Ok(Self(raw))
    }
}
