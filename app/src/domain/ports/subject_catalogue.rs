//! Port for the read-only subject list.
use async_trait::async_trait;

use crate::domain::{Subject, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subject catalogue adapters.
    pub enum SubjectCatalogueError {
        /// The catalogue could not be read.
        Unavailable { message: String } => "subject catalogue unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectCatalogue: Send + Sync {
    /// Every subject, in catalogue order.
    async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectCatalogueError>;

    /// Look up one subject.
    async fn find_subject(&self, id: &SubjectId) -> Result<Option<Subject>, SubjectCatalogueError>;
}
