//! In-memory adapters seeded from the bundled mock dataset.
//!
//! [`MemoryStore`] implements every data port: the user directory behind
//! [`AuthGateway`](crate::domain::ports::AuthGateway), the subject catalogue,
//! and the record and lesson-plan repositories. Each collection sits behind
//! its own `RwLock`, so concurrent writers are safe. Nothing is persisted.

mod auth;
mod catalogue;
mod lesson_plans;
mod mapping;
mod password;
mod records;

use std::sync::RwLock;

use mock_data::{MockDataset, MockTeachingRecord};
use thiserror::Error;
use tracing::info;

use crate::domain::{LessonPlan, Subject, TeachingRecord, User};

pub use self::password::PasswordHashError;

/// Errors raised while building or extending a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryStoreError {
    /// A dataset entry failed domain validation.
    #[error("mock dataset entry '{id}' is invalid: {message}")]
    InvalidEntry { id: String, message: String },
    /// A password could not be hashed.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
    /// A writer panicked while holding a collection lock.
    #[error("{collection} collection lock poisoned")]
    Poisoned { collection: &'static str },
}

/// A directory entry: the public user plus their password hash.
#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// Mutable in-memory data store.
#[derive(Debug)]
pub struct MemoryStore {
    users: RwLock<Vec<StoredUser>>,
    subjects: Vec<Subject>,
    records: RwLock<Vec<TeachingRecord>>,
    plans: RwLock<Vec<LessonPlan>>,
}

impl MemoryStore {
    /// Build a store holding `dataset`, hashing every password.
    pub fn from_dataset(dataset: &MockDataset) -> Result<Self, MemoryStoreError> {
        let users = dataset
            .users()
            .iter()
            .map(|mock| {
                Ok(StoredUser {
                    user: mapping::user(mock)?,
                    password_hash: password::hash(&mock.password)?,
                })
            })
            .collect::<Result<Vec<_>, MemoryStoreError>>()?;
        Self::with_users(users, dataset)
    }

    fn with_users(users: Vec<StoredUser>, dataset: &MockDataset) -> Result<Self, MemoryStoreError> {
        let subjects = dataset
            .subjects()
            .iter()
            .map(mapping::subject)
            .collect::<Result<Vec<_>, _>>()?;
        let records = dataset
            .teaching_records()
            .iter()
            .map(mapping::teaching_record)
            .collect::<Result<Vec<_>, _>>()?;
        let plans = dataset
            .lesson_plans()
            .iter()
            .map(mapping::lesson_plan)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            users = users.len(),
            subjects = subjects.len(),
            records = records.len(),
            plans = plans.len(),
            "mock store loaded"
        );
        Ok(Self {
            users: RwLock::new(users),
            subjects,
            records: RwLock::new(records),
            plans: RwLock::new(plans),
        })
    }

    /// Append generated records, e.g. from
    /// [`mock_data::generate_teaching_records`]. Returns how many were added.
    pub fn extend_records(
        &self,
        generated: &[MockTeachingRecord],
    ) -> Result<usize, MemoryStoreError> {
        let mapped = generated
            .iter()
            .map(mapping::teaching_record)
            .collect::<Result<Vec<_>, _>>()?;
        let count = mapped.len();
        self.records
            .write()
            .map_err(|_| MemoryStoreError::Poisoned {
                collection: "records",
            })?
            .extend(mapped);
        Ok(count)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared store fixture for adapter tests.
    use std::sync::{Arc, OnceLock};

    use super::*;

    /// A fresh bundled store per call. Password hashing runs once per test
    /// binary and the hashed directory is cloned into each store.
    pub(crate) fn bundled_store() -> Arc<MemoryStore> {
        static TEMPLATE: OnceLock<(MockDataset, Vec<StoredUser>)> = OnceLock::new();
        let (dataset, users) = TEMPLATE.get_or_init(|| {
            let dataset = MockDataset::bundled().expect("bundled dataset");
            let store = MemoryStore::from_dataset(&dataset).expect("store");
            let users = store.users.read().expect("users lock").clone();
            (dataset, users)
        });
        Arc::new(MemoryStore::with_users(users.clone(), dataset).expect("store from template"))
    }
}

#[cfg(test)]
mod tests {
    use mock_data::{RecordGenerationRequest, generate_teaching_records};

    use super::*;
    use crate::domain::ports::TeachingRecordRepository;
    use crate::domain::UserId;

    #[tokio::test]
    async fn generated_records_join_the_owner_list() {
        let store = test_support::bundled_store();
        let dataset = MockDataset::bundled().expect("bundled dataset");
        let generated = generate_teaching_records(
            &dataset,
            &RecordGenerationRequest {
                seed: 11,
                user_id: "2".to_owned(),
                count: 5,
                end_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 31).expect("date"),
                span_days: 31,
                max_period: 8,
            },
        )
        .expect("generated");

        assert_eq!(store.extend_records(&generated), Ok(5));
        let owner = UserId::new("2").expect("id");
        let listed = store.list_for_owner(&owner).await.expect("listed");
        assert_eq!(listed.len(), 5);
    }
}
