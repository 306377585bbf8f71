//! Builds the adapter graph for one command-line invocation.
//!
//! Users and report records come from the configured data source. Record and
//! plan writes always land in the in-memory store, which lives only as long
//! as the process.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mock_data::{
    DatasetError, GenerationError, MockDataset, RecordGenerationRequest, generate_teaching_records,
};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::{
    LessonPlanService, ReportExporter, SessionManager, SubjectReportService, TeachingRecordService,
};
use crate::outbound::backend::{AuthBackend, RecordSource};
use crate::outbound::export::{
    CommandPdfConverter, CommandShareSheet, ConfiguredShareSheet, OutboxShareSheet,
};
use crate::outbound::http::{ApiClientError, ApiEndpoint, HttpAuthGateway, HttpTeachingRecordQuery};
use crate::outbound::memory::{MemoryStore, MemoryStoreError};
use crate::outbound::storage::FileSessionStore;
use crate::settings::{AppSettings, DataSource, SettingsError, ShareTarget};

/// Days of history covered by generated mock records.
const GENERATED_SPAN_DAYS: u32 = 30;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Store(#[from] MemoryStoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error("cannot open session directory {path}: {source}")]
    SessionDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

pub(super) type ReportService =
    SubjectReportService<RecordSource, CommandPdfConverter, ConfiguredShareSheet>;

/// Domain services wired to concrete adapters.
pub struct CliServices {
    pub(super) data_source: DataSource,
    pub(super) store: Arc<MemoryStore>,
    pub(super) record_source: Arc<RecordSource>,
    pub(super) sessions: SessionManager<AuthBackend, FileSessionStore>,
    pub(super) records: TeachingRecordService<MemoryStore, MemoryStore>,
    pub(super) plans: LessonPlanService<MemoryStore, MemoryStore>,
    pub(super) reports: ReportService,
}

impl CliServices {
    /// Wire every adapter from `settings`.
    pub fn from_settings(
        settings: &AppSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, WiringError> {
        let (program, args) = settings.pdf_command();
        let converter = CommandPdfConverter::new(program, args, settings.export_dir()?);
        let share_sheet = match settings.share_target()? {
            ShareTarget::Command { program, args } => {
                ConfiguredShareSheet::Command(CommandShareSheet::new(program, args))
            }
            ShareTarget::Outbox(dir) => ConfiguredShareSheet::Outbox(OutboxShareSheet::new(dir)),
            ShareTarget::Disabled => ConfiguredShareSheet::Unavailable,
        };
        Self::with_export(settings, clock, converter, share_sheet)
    }

    /// Wire everything from `settings` except the export adapters.
    pub fn with_export(
        settings: &AppSettings,
        clock: Arc<dyn Clock>,
        converter: CommandPdfConverter,
        share_sheet: ConfiguredShareSheet,
    ) -> Result<Self, WiringError> {
        let data_source = settings.data_source()?;
        let max_period = settings.max_period()?;
        let store = Arc::new(mock_store(settings, clock.as_ref(), max_period)?);

        let (auth, record_source) = match data_source {
            DataSource::Mock => (
                AuthBackend::Memory(Arc::clone(&store)),
                RecordSource::Memory(Arc::clone(&store)),
            ),
            DataSource::Remote => {
                let endpoint = ApiEndpoint::new(settings.api_base_url()?, settings.http_timeout())?;
                (
                    AuthBackend::Remote(HttpAuthGateway::new(endpoint.clone())),
                    RecordSource::Remote(HttpTeachingRecordQuery::new(endpoint)),
                )
            }
        };
        let session_dir = settings.session_dir()?;
        let session_store = FileSessionStore::open(&session_dir).map_err(|source| {
            WiringError::SessionDir {
                path: session_dir.clone(),
                source,
            }
        })?;
        info!(?data_source, session_dir = %session_dir, "services wired");

        let record_source = Arc::new(record_source);
        let exporter = Arc::new(ReportExporter::new(
            Arc::new(converter),
            Arc::new(share_sheet),
            settings.date_style(),
        ));
        Ok(Self {
            data_source,
            sessions: SessionManager::new(Arc::new(auth), Arc::new(session_store)),
            records: TeachingRecordService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                clock,
                max_period,
            ),
            plans: LessonPlanService::new(Arc::clone(&store), Arc::clone(&store)),
            reports: SubjectReportService::new(Arc::clone(&record_source), exporter),
            record_source,
            store,
        })
    }
}

/// The bundled dataset, plus generated records when requested.
fn mock_store(
    settings: &AppSettings,
    clock: &dyn Clock,
    max_period: u8,
) -> Result<MemoryStore, WiringError> {
    let dataset = MockDataset::bundled()?;
    let store = MemoryStore::from_dataset(&dataset)?;
    let count = settings.mock_record_count();
    if count == 0 {
        return Ok(store);
    }
    let end_date = clock.utc().date_naive();
    for (offset, user) in (0_u64..).zip(dataset.users()) {
        let generated = generate_teaching_records(
            &dataset,
            &RecordGenerationRequest {
                seed: settings.mock_seed().wrapping_add(offset),
                user_id: user.id.clone(),
                count,
                end_date,
                span_days: GENERATED_SPAN_DAYS,
                max_period,
            },
        )?;
        store.extend_records(&generated)?;
    }
    info!(per_user = count, "generated mock records");
    Ok(store)
}
