//! Session management: sign-in, registration, sign-out and restore.
//!
//! The manager owns the current [`SessionState`] and publishes it on a watch
//! channel. A successful sign-in or sign-up persists the user and token
//! through the [`SessionStore`] port; `restore` reads them back at start-up.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::auth::{AuthError, Registration, Session, SessionToken, SignInCredentials};
use super::ports::{AuthGateway, SessionKey, SessionStore, SessionStoreError};
use super::user::User;
use super::validation::ValidationError;

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Persisted state has not been read yet, or is being read.
    Loading,
    /// Nobody is signed in.
    SignedOut,
    /// A user is signed in.
    Authenticated(Session),
}

impl SessionState {
    /// Signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(session.user()),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// Session manager failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The form was rejected before any call was made.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The auth back end refused or failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Durable storage failed.
    #[error(transparent)]
    Storage(#[from] SessionStoreError),
    /// A protected operation ran without a signed-in user.
    #[error("sign in to continue")]
    Unauthenticated,
}

/// Coordinates the auth gateway, durable storage and observable state.
pub struct SessionManager<A, S> {
    gateway: Arc<A>,
    store: Arc<S>,
    state: watch::Sender<SessionState>,
}

impl<A, S> SessionManager<A, S> {
    /// Create a manager in the [`SessionState::Loading`] state.
    pub fn new(gateway: Arc<A>, store: Arc<S>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            gateway,
            store,
            state,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The signed-in session, or [`SessionError::Unauthenticated`].
    pub fn require_session(&self) -> Result<Session, SessionError> {
        match &*self.state.borrow() {
            SessionState::Authenticated(session) => Ok(session.clone()),
            SessionState::Loading | SessionState::SignedOut => Err(SessionError::Unauthenticated),
        }
    }
}

impl<A, S> SessionManager<A, S>
where
    A: AuthGateway,
    S: SessionStore,
{
    /// Rehydrate the session persisted by an earlier run.
    ///
    /// Missing or unreadable entries leave the manager signed out. A corrupt
    /// user entry is also cleared from storage.
    pub async fn restore(&self) -> SessionState {
        self.state.send_replace(SessionState::Loading);
        let restored = match self.read_persisted().await {
            Ok(Some(session)) => {
                info!(user_id = %session.user().id(), "session restored");
                SessionState::Authenticated(session)
            }
            Ok(None) => SessionState::SignedOut,
            Err(err) => {
                warn!(error = %err, "failed to read persisted session");
                SessionState::SignedOut
            }
        };
        self.state.send_replace(restored.clone());
        restored
    }

    async fn read_persisted(&self) -> Result<Option<Session>, SessionStoreError> {
        let user_json = self.store.get(SessionKey::User).await?;
        let token = self.store.get(SessionKey::Token).await?;
        let (Some(user_json), Some(token)) = (user_json, token) else {
            return Ok(None);
        };
        let user = match serde_json::from_str::<User>(&user_json) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "persisted user is corrupt; clearing session");
                self.clear_persisted().await?;
                return Ok(None);
            }
        };
        let Ok(token) = SessionToken::new(token) else {
            warn!("persisted token is blank; clearing session");
            self.clear_persisted().await?;
            return Ok(None);
        };
        Ok(Some(Session::new(user, token)))
    }

    async fn clear_persisted(&self) -> Result<(), SessionStoreError> {
        self.store.remove(SessionKey::User).await?;
        self.store.remove(SessionKey::Token).await
    }

    async fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        let user_json = serde_json::to_string(session.user())
            .map_err(|err| SessionStoreError::io(err.to_string()))?;
        self.store.set(SessionKey::User, &user_json).await?;
        if let Err(err) = self
            .store
            .set(SessionKey::Token, session.token().expose())
            .await
        {
            if let Err(cleanup) = self.store.remove(SessionKey::User).await {
                warn!(error = %cleanup, "failed to roll back partial session write");
            }
            return Err(err);
        }
        Ok(())
    }

    async fn establish(&self, session: Session) -> Result<Session, SessionError> {
        self.persist(&session).await?;
        info!(user_id = %session.user().id(), "signed in");
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Validate the form, authenticate, persist and publish the session.
    ///
    /// On any failure nothing is persisted and the state is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let credentials = SignInCredentials::try_from_parts(email, password)?;
        debug!(email = %credentials.email(), "signing in");
        let session = self
            .gateway
            .sign_in(&credentials)
            .await
            .inspect_err(|err| warn!(error = %err, "sign-in refused"))?;
        self.establish(session).await
    }

    /// Validate the registration form, create the account and sign in.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session, SessionError> {
        let registration = Registration::try_from_parts(name, email, password, confirm_password)?;
        debug!(email = %registration.email(), "registering");
        let session = self
            .gateway
            .sign_up(&registration)
            .await
            .inspect_err(|err| warn!(error = %err, "registration refused"))?;
        self.establish(session).await
    }

    /// Forget the session locally and in storage.
    ///
    /// The state becomes signed out even when clearing storage fails; the
    /// storage error is still returned.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.state.send_replace(SessionState::SignedOut);
        self.clear_persisted().await?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
