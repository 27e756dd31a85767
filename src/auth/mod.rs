use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Claims carried by a blog access token.
///
/// Only `id` is required; tokens minted by the signin service carry nothing else.
/// `exp` is checked when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "subject_id")]
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(id: i32, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        Self {
            id,
            iat: Some(now.timestamp()),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid JWT token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Accept the subject id either as a JSON integer or as a string holding one
fn subject_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("subject id is not an integer: {text}"))),
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation
}

/// Verify an HS256 token against the shared secret and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    if token.trim().is_empty() {
        return Err(JwtError::MissingToken);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token.trim(), &decoding_key, &validation())?;

    Ok(token_data.claims)
}

/// Sign a token for `subject`. Used by the developer CLI and tests.
pub fn issue_token(subject: i32, secret: &str, ttl: Option<Duration>) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, &Claims::new(subject, ttl), &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
