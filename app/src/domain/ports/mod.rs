//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod document_converter;
mod lesson_plan_repository;
mod session_store;
mod share_sheet;
mod subject_catalogue;
mod teaching_record_query;
mod teaching_record_repository;

pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use document_converter::MockDocumentConverter;
pub use document_converter::{DocumentConversionError, DocumentConverter, ExportedFile};
#[cfg(test)]
pub use lesson_plan_repository::MockLessonPlanRepository;
pub use lesson_plan_repository::{LessonPlanRepository, LessonPlanRepositoryError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionKey, SessionStore, SessionStoreError};
#[cfg(test)]
pub use share_sheet::MockShareSheet;
pub use share_sheet::{ShareRequest, ShareSheet, ShareSheetError};
#[cfg(test)]
pub use subject_catalogue::MockSubjectCatalogue;
pub use subject_catalogue::{SubjectCatalogue, SubjectCatalogueError};
#[cfg(test)]
pub use teaching_record_query::MockTeachingRecordQuery;
pub use teaching_record_query::{TeachingRecordQuery, TeachingRecordQueryError};
#[cfg(test)]
pub use teaching_record_repository::MockTeachingRecordRepository;
pub use teaching_record_repository::{TeachingRecordRepository, TeachingRecordRepositoryError};
