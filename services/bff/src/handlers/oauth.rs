use anyhow::Context as _;
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tower_sessions::Session;
use url::Url;

use crate::domain::repository::IdentityProvider as _;
use crate::error::BffError;
use crate::handlers::auth::UserResponse;
use crate::infra::session::LoginSession;
use crate::state::AppState;
use crate::usecase::auth::AuthOutput;
use crate::usecase::oauth::CompleteGoogleLoginUseCase;

#[derive(Debug, Default, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user declines consent.
    pub error: Option<String>,
}

// ── GET /auth/google ─────────────────────────────────────────────────────────

pub async fn google_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, BffError> {
    let (url, csrf_state) = state.identity_provider().authorize_url();
    LoginSession::new(&session)
        .set_oauth_state(csrf_state)
        .await?;
    Ok(Redirect::to(url.as_str()))
}

// ── GET /auth/google/callback ────────────────────────────────────────────────

/// Always answers with a redirect back to the frontend, carrying either the
/// new token or `error=oauth_failed`.
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GoogleCallbackQuery>,
) -> Redirect {
    match complete_google_login(&state, &session, query).await {
        Ok(url) => Redirect::to(url.as_str()),
        Err(e) => {
            tracing::warn!(error = ?e, kind = e.kind(), "google sign-in failed");
            Redirect::to(failure_url(&state.frontend_url).as_str())
        }
    }
}

async fn complete_google_login(
    state: &AppState,
    session: &Session,
    query: GoogleCallbackQuery,
) -> Result<Url, BffError> {
    let login = LoginSession::new(session);
    let expected = login.take_oauth_state().await?;
    if let Some(error) = query.error {
        return Err(BffError::OAuthDenied(error));
    }
    match (expected, query.state) {
        (Some(expected), Some(returned)) if expected == returned => {}
        _ => return Err(BffError::InvalidOAuthState),
    }
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or(BffError::MissingData("code"))?;

    let uc = CompleteGoogleLoginUseCase {
        users: state.user_repo(),
        provider: state.identity_provider(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = uc.execute(&code).await?;
    login.set_email(&output.user.email).await?;
    success_url(&state.frontend_url, &output)
}

/// `<frontend>/<segments..>` keeping any base path the frontend is served under.
fn frontend_page(frontend: &Url, segments: &[&str]) -> Url {
    let mut url = frontend.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn success_url(frontend: &Url, output: &AuthOutput) -> Result<Url, BffError> {
    let user = serde_json::to_string(&UserResponse::from(&output.user))
        .context("encode callback user")?;
    let mut url = frontend_page(frontend, &["auth", "callback"]);
    url.query_pairs_mut()
        .append_pair("token", &output.token)
        .append_pair("user", &user);
    Ok(url)
}

fn failure_url(frontend: &Url) -> Url {
    let mut url = frontend_page(frontend, &["login"]);
    url.query_pairs_mut().append_pair("error", "oauth_failed");
    url
}
