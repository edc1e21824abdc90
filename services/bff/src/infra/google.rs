use anyhow::{Context as _, anyhow};
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use url::Url;

use crate::config::GoogleSettings;
use crate::domain::repository::IdentityProvider;
use crate::domain::types::IdentityProfile;
use crate::error::BffError;

/// OAuth2 client with the authorization and token endpoints configured.
pub type GoogleOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Google sign-in through the authorization-code flow.
#[derive(Clone)]
pub struct GoogleIdentityProvider {
    oauth: GoogleOAuthClient,
    http: reqwest::Client,
    userinfo_url: Url,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    name: Option<String>,
}

impl GoogleIdentityProvider {
    pub fn new(settings: &GoogleSettings) -> anyhow::Result<Self> {
        let oauth = BasicClient::new(ClientId::new(settings.client_id.clone()))
            .set_client_secret(ClientSecret::new(settings.client_secret.clone()))
            .set_auth_uri(AuthUrl::from_url(settings.auth_url.clone()))
            .set_token_uri(TokenUrl::from_url(settings.token_url.clone()))
            .set_redirect_uri(RedirectUrl::from_url(settings.callback_url.clone()));
        // The token endpoint must never be followed through a redirect.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build google http client")?;
        Ok(Self {
            oauth,
            http,
            userinfo_url: settings.userinfo_url.clone(),
        })
    }
}

impl IdentityProvider for GoogleIdentityProvider {
    fn authorize_url(&self) -> (Url, String) {
        let (url, state) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("profile".to_owned()))
            .add_scope(Scope::new("email".to_owned()))
            .url();
        (url, state.secret().to_owned())
    }

    async fn fetch_profile(&self, code: &str) -> Result<IdentityProfile, BffError> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .request_async(&self.http)
            .await
            .map_err(|e| anyhow!("google token exchange failed: {e}"))?;

        let info: GoogleUserInfo = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .context("request google userinfo")?
            .error_for_status()
            .context("google userinfo status")?
            .json()
            .await
            .context("decode google userinfo")?;

        let email = info
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| anyhow!("google profile has no email"))?;
        Ok(IdentityProfile {
            email,
            display_name: info.name.filter(|n| !n.is_empty()),
        })
    }
}
