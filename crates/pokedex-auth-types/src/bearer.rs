//! `Authorization: Bearer <token>` extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use crate::token::validate_token;

/// HMAC secret used to verify bearer tokens, provided by the router state.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

/// Caller identity decoded from a valid bearer token.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub email: String,
    pub exp: u64,
}

/// Why a request was rejected by [`BearerIdentity`]. Always renders 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerRejection {
    #[error("no token")]
    Missing,
    #[error("invalid token")]
    Invalid,
}

impl BearerRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "NO_TOKEN",
            Self::Invalid => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for BearerRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Resolve the bearer identity from request headers without going through the
/// extractor. Used by extractors that need the identity plus further lookups.
pub fn authenticate(
    headers: &HeaderMap,
    secret: &str,
) -> Result<BearerIdentity, BearerRejection> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerRejection::Missing)?
        .to_str()
        .map_err(|_| BearerRejection::Invalid)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(BearerRejection::Invalid)?;
    let info = validate_token(token, secret).map_err(|_| BearerRejection::Invalid)?;
    Ok(BearerIdentity {
        email: info.email,
        exp: info.exp,
    })
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = BearerRejection;

    // Resolve synchronously and hand back a 'static future; an `async fn` here
    // would capture `parts` and trip E0195 against axum-core's signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = authenticate(&parts.headers, &secret.0);
        async move { result }
    }
}
