//! JWT bearer-token issuing and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Bearer-token lifetime in seconds (7 days).
pub const TOKEN_EXP: u64 = 604_800;

/// Identity extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub email: String,
    pub exp: u64,
}

/// Errors returned by [`validate_token`] and [`issue_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `email` | custom | the user's email, the only identity the token carries |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | expiration, `iat + TOKEN_EXP` |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Issue a token for `email` valid for [`TOKEN_EXP`] seconds from now.
///
/// Returns the encoded token and its `exp` timestamp.
pub fn issue_token(email: &str, secret: &str) -> Result<(String, u64), AuthError> {
    issue_token_at(email, secret, now_secs())
}

/// Issue a token as if the current time were `issued_at`.
pub fn issue_token_at(
    email: &str,
    secret: &str,
    issued_at: u64,
) -> Result<(String, u64), AuthError> {
    let exp = issued_at + TOKEN_EXP;
    let claims = JwtClaims {
        email: email.to_owned(),
        iat: issued_at,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok((token, exp))
}

/// Validate a bearer token, returning the identity it carries.
///
/// Validation: HS256, `exp` required and checked with the default 60s leeway.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(TokenInfo {
        email: data.claims.email,
        exp: data.claims.exp,
    })
}
