//! Centralized, read-through access to the persisted session.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;

use super::{
    Role, Session, SessionEvent, SessionStorage, SignOutReason, TOKEN_KEY, USER_KEY, UserRecord,
};
use crate::error::Result;

/// Every read goes to storage; nothing about the session is cached in memory.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    events: Arc<watch::Sender<Option<SessionEvent>>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (events, _) = watch::channel(None);
        Self {
            storage,
            events: Arc::new(events),
        }
    }

    /// Current bearer token, read fresh from storage.
    pub fn token(&self) -> Result<Option<SecretString>> {
        Ok(self
            .storage
            .read(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from))
    }

    /// The full session, or `None` unless both entries are present and valid.
    ///
    /// A user entry without a token is ignored.
    pub fn current(&self) -> Result<Option<Session>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let Some(raw_user) = self.storage.read(USER_KEY)? else {
            tracing::debug!("token present without user record; treating as signed out");
            return Ok(None);
        };
        match serde_json::from_str::<UserRecord>(&raw_user) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(e) => {
                tracing::warn!("ignoring unreadable user record: {e}");
                Ok(None)
            }
        }
    }

    pub fn user(&self) -> Result<Option<UserRecord>> {
        Ok(self.current()?.map(|s| s.user))
    }

    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.current()?.is_some())
    }

    pub fn is_admin(&self) -> Result<bool> {
        Ok(self.user()?.is_some_and(|u| u.role == Role::Admin))
    }

    pub fn sign_in(&self, token: &str, user: &UserRecord) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.storage
            .write_all(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])?;
        tracing::info!(user_id = user.id, role = %user.role, "signed in");
        self.events
            .send_replace(Some(SessionEvent::SignedIn(user.clone())));
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.clear(SignOutReason::Logout)
    }

    /// Drop the session after the backend rejected it. Safe to call repeatedly.
    pub fn invalidate(&self) -> Result<()> {
        self.clear(SignOutReason::Invalidated)
    }

    fn clear(&self, reason: SignOutReason) -> Result<()> {
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY])?;
        tracing::info!(?reason, "session cleared");
        self.events
            .send_replace(Some(SessionEvent::SignedOut(reason)));
        Ok(())
    }

    /// Receiver that observes the latest session event.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionEvent>> {
        self.events.subscribe()
    }
}
