//! Port for the authentication back end: the mock user directory or the
//! remote sign-in/sign-up endpoints.

use async_trait::async_trait;

use crate::domain::{AuthError, Registration, Session, SignInCredentials};

/// Issues sessions for valid credentials and new registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// Unknown emails and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`].
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError>;

    /// Create an account and a session for it.
    ///
    /// An email already on file (compared case-insensitively) yields
    /// [`AuthError::AlreadyRegistered`] and leaves the directory unchanged.
    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError>;
}
