//! Administration screen: list accounts and toggle admin rights.
//!
//! Access is checked on the client from the session's `is_admin` flag
//! before anything is sent; the backend enforces the same rule.

use super::ViewError;
use super::session::Session;
use crate::net::types::User;

#[derive(Debug, Default)]
pub struct AdminView {
    users: Vec<User>,
}

impl AdminView {
    /// Check access and load the user list.
    ///
    /// # Errors
    ///
    /// [`ViewError::NotSignedIn`] / [`ViewError::NotAdmin`] without a
    /// request, else the API error.
    pub async fn open(session: &Session) -> Result<Self, ViewError> {
        let mut view = Self::default();
        view.reload(session).await?;
        Ok(view)
    }

    /// # Errors
    ///
    /// See [`AdminView::open`].
    pub async fn reload(&mut self, session: &Session) -> Result<(), ViewError> {
        ensure_admin(session)?;
        self.users = session.api().list_users().await?;
        Ok(())
    }

    /// Grant admin rights, then reload the list.
    ///
    /// # Errors
    ///
    /// See [`AdminView::open`].
    pub async fn promote(&mut self, session: &Session, user_id: i64) -> Result<(), ViewError> {
        ensure_admin(session)?;
        session.api().promote_user(user_id).await?;
        tracing::info!(user_id, "user promoted");
        self.reload(session).await
    }

    /// Revoke admin rights, then reload the list.
    ///
    /// # Errors
    ///
    /// See [`AdminView::open`].
    pub async fn demote(&mut self, session: &Session, user_id: i64) -> Result<(), ViewError> {
        ensure_admin(session)?;
        session.api().demote_user(user_id).await?;
        tracing::info!(user_id, "user demoted");
        self.reload(session).await
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_admin).count()
    }
}

fn ensure_admin(session: &Session) -> Result<(), ViewError> {
    if !session.is_authenticated() {
        return Err(ViewError::NotSignedIn);
    }
    if !session.is_admin() {
        return Err(ViewError::NotAdmin);
    }
    Ok(())
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
