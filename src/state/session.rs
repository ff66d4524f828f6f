//! Session store: who is signed in.
//!
//! DESIGN
//! ======
//! `Session` is an explicit object owned by the front end, constructed once
//! at startup and passed by reference to whatever needs it. It owns the
//! [`ApiClient`], whose token store is the only persisted piece of session
//! state. `is_authenticated` is derived from `user` and never stored.
//!
//! LIFECYCLE
//! =========
//! `new` → loading. `start`/`restore` resolves exactly once:
//! - no persisted token → anonymous
//! - token accepted by `GET /utilisateurs/me` → authenticated
//! - token rejected (401/403) → token removed, anonymous
//! - any other failure → anonymous for this run, token kept
//!
//! Afterwards only `login`/`register` (→ authenticated) and `logout`
//! (→ anonymous) mutate the session. Logout is client-side only: the token
//! is forgotten locally and stays valid on the server until it expires.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Credentials, User};
use crate::storage::StorageError;

pub struct Session {
    api: ApiClient,
    user: Option<User>,
    loading: bool,
}

impl Session {
    /// Session in the loading state; nothing has been checked yet.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, user: None, loading: true }
    }

    /// Construct and run the startup check.
    pub async fn start(api: ApiClient) -> Self {
        let mut session = Self::new(api);
        session.restore().await;
        session
    }

    /// Resolve the loading state from the persisted token. Runs once; later
    /// calls are no-ops.
    pub async fn restore(&mut self) {
        if !self.loading {
            return;
        }

        if self.api.has_token() {
            match self.api.current_user().await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, username = %user.username, "session restored");
                    self.user = Some(user);
                }
                Err(e) if e.is_unauthorized() => {
                    tracing::info!(detail = %e, "persisted token rejected; signing out");
                    if let Err(e) = self.api.tokens().clear() {
                        tracing::warn!(error = %e, "failed to remove rejected token");
                    }
                }
                Err(e) => {
                    tracing::warn!(detail = %e, "could not verify persisted token");
                }
            }
        }

        self.loading = false;
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Sign in. The API client persists the token; the identity is then
    /// read back from the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's message unchanged when the credentials are
    /// rejected. The session is left as it was.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User, ApiError> {
        self.api.login(&Credentials::new(username, password)).await?;
        Ok(self.establish(username).await)
    }

    /// Create an account and sign in immediately.
    ///
    /// # Errors
    ///
    /// Returns the backend's message unchanged when registration fails.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<&User, ApiError> {
        self.api.register(&Credentials::new(username, password)).await?;
        Ok(self.establish(username).await)
    }

    /// Forget the token and the user. The user is cleared even when the
    /// token slot cannot be emptied.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted token could not be removed.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = user.id, "signed out");
        }
        self.loading = false;
        self.api.tokens().clear()
    }

    async fn establish(&mut self, username: &str) -> &User {
        let user = match self.api.current_user().await {
            Ok(user) if !user.username.is_empty() => user,
            Ok(_) => provisional_identity(username),
            Err(e) => {
                tracing::debug!(detail = %e, "identity lookup failed; using submitted username");
                provisional_identity(username)
            }
        };
        self.loading = false;
        self.user.insert(user)
    }
}

/// Identity built from the submitted username when the backend cannot
/// describe the account.
fn provisional_identity(username: &str) -> User {
    User {
        id: 0,
        username: username.to_owned(),
        created_at: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        is_admin: false,
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
