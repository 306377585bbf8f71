//! Port for durable key/value storage of the signed-in session.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Reading or writing the backing storage failed.
        Io { message: String } => "session store I/O failed: {message}",
    }
}

/// Keys the session manager persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Serialised [`User`](crate::domain::User) JSON.
    User,
    /// Raw session token.
    Token,
}

impl SessionKey {
    /// Storage key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String storage that survives process restarts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value; `None` when the key was never written or was removed.
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError>;

    /// Delete a value. Removing an absent key succeeds.
    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_their_storage_names() {
        assert_eq!(SessionKey::User.as_str(), "user");
        assert_eq!(SessionKey::Token.to_string(), "token");
    }
}
