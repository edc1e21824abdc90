//! Bearer-token helpers for integration tests.
//!
//! Protected routes expect `Authorization: Bearer <jwt>`. `MockAuth` signs a real
//! token with the test secret so requests go through the same extractor as
//! production traffic.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};

use pokedex_auth_types::token::{issue_token, issue_token_at};

/// Identity to sign into test requests.
pub struct MockAuth {
    pub email: String,
}

impl MockAuth {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// A freshly issued token for this identity.
    pub fn token(&self, secret: &str) -> String {
        issue_token(&self.email, secret).unwrap().0
    }

    /// `Bearer <token>` header value.
    pub fn bearer(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap()
    }

    /// `Bearer <token>` for a token that expired a day ago.
    pub fn expired_bearer(&self, secret: &str) -> HeaderValue {
        let eight_days_ago = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            - 8 * 24 * 60 * 60;
        let (token, _) = issue_token_at(&self.email, secret, eight_days_ago).unwrap();
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    /// Headers as a browser client would send them.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer(secret));
        map
    }
}
