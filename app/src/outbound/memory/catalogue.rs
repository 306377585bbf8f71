//! Subject catalogue over the bundled subject list.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{SubjectCatalogue, SubjectCatalogueError};
use crate::domain::{Subject, SubjectId};

#[async_trait]
impl SubjectCatalogue for MemoryStore {
    async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectCatalogueError> {
        Ok(self.subjects.clone())
    }

    async fn find_subject(&self, id: &SubjectId) -> Result<Option<Subject>, SubjectCatalogueError> {
        Ok(self
            .subjects
            .iter()
            .find(|subject| subject.id() == id)
            .cloned())
    }
}
