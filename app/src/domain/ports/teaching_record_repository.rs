//! Port abstraction for teaching record persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{RecordId, TeachingRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by teaching record repositories.
    pub enum TeachingRecordRepositoryError {
        /// A record with the same id is already stored.
        Duplicate { id: String } => "teaching record {id} already exists",
        /// The backing storage failed.
        Storage { message: String } => "teaching record storage failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeachingRecordRepository: Send + Sync {
    /// Fetch a record by id.
    async fn get(&self, id: &RecordId)
    -> Result<Option<TeachingRecord>, TeachingRecordRepositoryError>;

    /// Store a new record. Records are immutable, so ids must be unused.
    async fn add(&self, record: &TeachingRecord) -> Result<(), TeachingRecordRepositoryError>;

    /// Every record owned by `owner`, in insertion order.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordRepositoryError>;
}
