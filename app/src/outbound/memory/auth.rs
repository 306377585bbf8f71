//! Mock user directory implementing the auth gateway.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::{MemoryStore, StoredUser, password};
use crate::domain::ports::AuthGateway;
use crate::domain::{
    AuthError, Registration, Session, SessionToken, SignInCredentials, User, UserId,
};

fn issue_token() -> Result<SessionToken, AuthError> {
    SessionToken::new(format!("mock-{}", Uuid::new_v4()))
        .map_err(|err| AuthError::network(err.to_string()))
}

fn poisoned() -> AuthError {
    AuthError::network("user directory lock poisoned")
}

#[async_trait]
impl AuthGateway for MemoryStore {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError> {
        let found = {
            let users = self.users.read().map_err(|_| poisoned())?;
            users
                .iter()
                .find(|stored| stored.user.email().matches(credentials.email()))
                .cloned()
        };
        let Some(stored) = found else {
            debug!("sign-in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        let matched = password::verify_blocking(credentials.password(), stored.password_hash).await;
        if !matched {
            debug!(user_id = %stored.user.id(), "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session::new(stored.user, issue_token()?))
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError> {
        let password_hash = password::hash_blocking(registration.password())
            .await
            .map_err(|err| AuthError::network(err.to_string()))?;
        let user = {
            let mut users = self.users.write().map_err(|_| poisoned())?;
            if users
                .iter()
                .any(|stored| stored.user.email().matches(registration.email()))
            {
                return Err(AuthError::AlreadyRegistered);
            }
            let id = UserId::new(Uuid::new_v4().to_string())
                .map_err(|err| AuthError::network(err.to_string()))?;
            let user = User::new(id, registration.email().clone(), registration.name().clone());
            users.push(StoredUser {
                user: user.clone(),
                password_hash,
            });
            user
        };
        info!(user_id = %user.id(), "mock account registered");
        Ok(Session::new(user, issue_token()?))
    }
}
