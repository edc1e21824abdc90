use std::future::Future;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use pokedex_auth_types::bearer::authenticate;

use crate::domain::types::User;
use crate::state::AppState;
use crate::usecase::user::GetCallerUseCase;

/// The account behind the request's bearer token.
///
/// Rejects with the bearer extractor's 401 when the token is missing or bad,
/// and with `INVALID_TOKEN` when the token names an unknown account.
pub struct Caller(pub User);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Response;

    // Header checks run before the returned future so it does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = authenticate(&parts.headers, &state.jwt_secret);
        let uc = GetCallerUseCase {
            users: state.user_repo(),
        };
        async move {
            let identity = identity.map_err(IntoResponse::into_response)?;
            let user = uc
                .execute(&identity.email)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Caller(user))
        }
    }
}
