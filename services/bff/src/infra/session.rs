//! Typed access to the cookie session.
//!
//! The session only matters during Google sign-in: it carries the CSRF state
//! across the provider redirect and, once signed in, the user's email.

use anyhow::Context as _;
use sha2::{Digest, Sha512};
use tower_sessions::Session;
use tower_sessions::cookie::Key;

use crate::error::BffError;

const OAUTH_STATE_KEY: &str = "oauth.state";
const SIGNED_IN_EMAIL_KEY: &str = "auth.email";

pub struct LoginSession<'a> {
    session: &'a Session,
}

impl<'a> LoginSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_oauth_state(&self, state: String) -> Result<(), BffError> {
        self.session
            .insert(OAUTH_STATE_KEY, state)
            .await
            .context("store oauth state")?;
        Ok(())
    }

    /// Remove and return the pending OAuth state so it cannot be replayed.
    pub async fn take_oauth_state(&self) -> Result<Option<String>, BffError> {
        let state = self
            .session
            .remove::<String>(OAUTH_STATE_KEY)
            .await
            .context("take oauth state")?;
        Ok(state)
    }

    pub async fn set_email(&self, email: &str) -> Result<(), BffError> {
        self.session
            .insert(SIGNED_IN_EMAIL_KEY, email)
            .await
            .context("store session email")?;
        Ok(())
    }

    pub async fn email(&self) -> Result<Option<String>, BffError> {
        let email = self
            .session
            .get::<String>(SIGNED_IN_EMAIL_KEY)
            .await
            .context("read session email")?;
        Ok(email)
    }

    /// Drop all session data and delete the session record.
    pub async fn end(&self) -> Result<(), BffError> {
        self.session.flush().await.context("flush session")?;
        Ok(())
    }
}

/// Cookie-signing key derived from an arbitrary-length secret.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}
