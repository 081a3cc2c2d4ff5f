//! Client-side access-token decoding.
//!
//! The monitor only needs to know whether an authenticated, unexpired user
//! exists before it starts. The client never holds the signing secret, so
//! the token is decoded with signature validation disabled; expiry is still
//! validated, and an expired or malformed token counts as "no user".

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::MonitorError;

/// JWT claims the monitor cares about
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Decode the stored access token without verifying its signature.
///
/// # Errors
///
/// Returns `MonitorError::Token` for malformed tokens and for tokens whose
/// `exp` has passed; callers treat both as "no authenticated user".
pub fn decode_claims(token: &str) -> Result<Claims, MonitorError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims)
}
