//! Subject report service: fetch, group, render and export.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::aggregation::{ReportMonth, SubjectRecordGroup, group_by_subject, records_in_month};
use super::auth::Session;
use super::export::{ExportError, ExportReceipt, ReportExporter};
use super::ports::{DocumentConverter, ShareSheet, TeachingRecordQuery, TeachingRecordQueryError};
use super::report::ReportData;
use super::subject::SubjectId;
use super::teaching_record::TeachingRecord;

/// Failures while building or exporting subject reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Query(#[from] TeachingRecordQueryError),
    /// The teacher has no records for the subject in the chosen period.
    #[error("no records for subject '{subject_id}'")]
    SubjectNotFound { subject_id: String },
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Wires the record query, aggregator, renderer and exporter together.
pub struct SubjectReportService<Q, C, S> {
    records: Arc<Q>,
    exporter: Arc<ReportExporter<C, S>>,
}

impl<Q, C, S> SubjectReportService<Q, C, S> {
    pub fn new(records: Arc<Q>, exporter: Arc<ReportExporter<C, S>>) -> Self {
        Self { records, exporter }
    }

    /// Exporter shared with adapters that watch the in-flight subject.
    #[must_use]
    pub fn exporter(&self) -> &Arc<ReportExporter<C, S>> {
        &self.exporter
    }
}

impl<Q, C, S> SubjectReportService<Q, C, S>
where
    Q: TeachingRecordQuery,
    C: DocumentConverter,
    S: ShareSheet,
{
    async fn owned_records(
        &self,
        session: &Session,
        month: Option<ReportMonth>,
    ) -> Result<Vec<TeachingRecord>, ReportServiceError> {
        let owner = session.user().id();
        let fetched = self.records.fetch_for_owner(owner).await?;
        let total = fetched.len();
        let owned: Vec<TeachingRecord> = fetched
            .into_iter()
            .filter(|record| record.owner() == owner)
            .collect();
        if owned.len() != total {
            warn!(
                dropped = total - owned.len(),
                "record source returned records owned by another user"
            );
        }
        Ok(match month {
            Some(month) => records_in_month(owned, month),
            None => owned,
        })
    }

    /// The teacher's records grouped by subject, optionally for one month.
    pub async fn subject_groups(
        &self,
        session: &Session,
        month: Option<ReportMonth>,
    ) -> Result<Vec<SubjectRecordGroup>, ReportServiceError> {
        let groups = group_by_subject(self.owned_records(session, month).await?);
        debug!(groups = groups.len(), "grouped teaching records");
        Ok(groups)
    }

    /// Export one subject's report.
    pub async fn export_subject(
        &self,
        session: &Session,
        subject_id: &SubjectId,
        month: Option<ReportMonth>,
    ) -> Result<ExportReceipt, ReportServiceError> {
        let group = self
            .subject_groups(session, month)
            .await?
            .into_iter()
            .find(|group| group.subject_id() == subject_id)
            .ok_or_else(|| ReportServiceError::SubjectNotFound {
                subject_id: subject_id.to_string(),
            })?;
        let report = ReportData::from_group(session.user().name().as_ref(), &group);
        Ok(self.exporter.export(&report).await?)
    }
}
