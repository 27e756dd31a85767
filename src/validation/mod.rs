//! Request body shapes for the blog endpoints.
//!
//! Checking happens before any gateway is opened, so a rejected body never
//! causes a side effect. Unknown fields are ignored; in particular a client
//! supplied `authorId` is dropped on the floor.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Inputs are not valid: {reason}")]
pub struct InvalidInput {
    pub reason: String,
}

/// Body of `POST /`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostInput {
    pub id: i32,
    pub title: String,
    pub content: String,
}

/// Check an already-decoded JSON value against shape `T`
pub fn safe_parse<T: DeserializeOwned>(body: Value) -> Result<T, InvalidInput> {
    serde_json::from_value(body).map_err(|e| InvalidInput {
        reason: e.to_string(),
    })
}

/// Decode raw request bytes and check them against shape `T`.
/// Bytes that are not JSON at all fail the same way as a wrong shape.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, InvalidInput> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| InvalidInput {
        reason: format!("malformed JSON: {e}"),
    })?;
    safe_parse(value)
}
