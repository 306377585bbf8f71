//! Run-time choice between the in-memory and remote back ends.

use std::sync::Arc;

use async_trait::async_trait;

use super::http::{HttpAuthGateway, HttpTeachingRecordQuery};
use super::memory::MemoryStore;
use crate::domain::ports::{AuthGateway, TeachingRecordQuery, TeachingRecordQueryError};
use crate::domain::{AuthError, Registration, Session, SignInCredentials, TeachingRecord, UserId};

/// Where sessions are issued.
#[derive(Debug, Clone)]
pub enum AuthBackend {
    Memory(Arc<MemoryStore>),
    Remote(HttpAuthGateway),
}

#[async_trait]
impl AuthGateway for AuthBackend {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError> {
        match self {
            Self::Memory(store) => store.sign_in(credentials).await,
            Self::Remote(gateway) => gateway.sign_in(credentials).await,
        }
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError> {
        match self {
            Self::Memory(store) => store.sign_up(registration).await,
            Self::Remote(gateway) => gateway.sign_up(registration).await,
        }
    }
}

/// Where report records are read from.
#[derive(Debug, Clone)]
pub enum RecordSource {
    Memory(Arc<MemoryStore>),
    Remote(HttpTeachingRecordQuery),
}

#[async_trait]
impl TeachingRecordQuery for RecordSource {
    async fn fetch_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordQueryError> {
        match self {
            Self::Memory(store) => store.fetch_for_owner(owner).await,
            Self::Remote(query) => query.fetch_for_owner(owner).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::memory::test_support::bundled_store;

    #[tokio::test]
    async fn memory_backend_signs_in_bundled_teacher() {
        let backend = AuthBackend::Memory(bundled_store());
        let credentials =
            SignInCredentials::try_from_parts("teacher1@example.com", "password123").expect("form");
        let session = backend.sign_in(&credentials).await.expect("session");
        assert_eq!(session.user().name().as_ref(), "John Doe");
    }

    #[tokio::test]
    async fn memory_source_reads_the_store() {
        let source = RecordSource::Memory(bundled_store());
        let records = source
            .fetch_for_owner(&UserId::new("1").expect("id"))
            .await
            .expect("records");
        assert_eq!(records.len(), 3);
    }
}
