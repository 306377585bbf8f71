//! Daily teaching record service: log a lesson, list a teacher's lessons.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use super::aggregation::sort_newest_first;
use super::auth::Session;
use super::ports::{
    SubjectCatalogue, SubjectCatalogueError, TeachingRecordRepository,
    TeachingRecordRepositoryError,
};
use super::teaching_record::{
    RecordId, TeachingRecord, TeachingRecordDraft, TeachingRecordParts,
};
use super::validation::ValidationError;

/// Failures while adding or listing records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordServiceError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The selected subject is not in the catalogue.
    #[error("unknown subject '{subject_id}'")]
    UnknownSubject { subject_id: String },
    #[error(transparent)]
    Catalogue(#[from] SubjectCatalogueError),
    #[error(transparent)]
    Repository(#[from] TeachingRecordRepositoryError),
}

/// Logs and lists teaching records for the signed-in teacher.
pub struct TeachingRecordService<R, C> {
    records: Arc<R>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
    max_period: u8,
}

impl<R, C> TeachingRecordService<R, C> {
    /// Create a service accepting periods `1..=max_period`.
    pub fn new(records: Arc<R>, catalogue: Arc<C>, clock: Arc<dyn Clock>, max_period: u8) -> Self {
        Self {
            records,
            catalogue,
            clock,
            max_period,
        }
    }

    /// Highest selectable period.
    #[must_use]
    pub const fn max_period(&self) -> u8 {
        self.max_period
    }
}

impl<R, C> TeachingRecordService<R, C>
where
    R: TeachingRecordRepository,
    C: SubjectCatalogue,
{
    /// Validate and store a record dated today (UTC calendar day).
    pub async fn add(
        &self,
        session: &Session,
        draft: TeachingRecordDraft,
    ) -> Result<TeachingRecord, RecordServiceError> {
        let valid = draft.validate(self.max_period)?;
        let subject = self
            .catalogue
            .find_subject(&valid.subject_id)
            .await?
            .ok_or_else(|| RecordServiceError::UnknownSubject {
                subject_id: valid.subject_id.to_string(),
            })?;

        let record = TeachingRecord::new(TeachingRecordParts {
            id: RecordId::random(),
            owner: session.user().id().clone(),
            date: self.clock.utc().date_naive(),
            period: valid.period,
            subject_id: subject.id().clone(),
            subject_name: subject.name().to_owned(),
            description: valid.description,
            grade: None,
        });
        self.records.add(&record).await?;
        info!(
            record_id = %record.id(),
            subject = record.subject_name(),
            period = record.period().get(),
            "teaching record added"
        );
        Ok(record)
    }

    /// The teacher's records, newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<TeachingRecord>, RecordServiceError> {
        let mut records = self.records.list_for_owner(session.user().id()).await?;
        sort_newest_first(&mut records);
        debug!(count = records.len(), "listed teaching records");
        Ok(records)
    }
}
